use robot_vacuum::engine::FinishedRun;
use robot_vacuum::render::GridRenderer;
use robot_vacuum::report::RunSummary;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
struct Rejected {
    valid: bool,
    errors: Vec<String>,
}

#[wasm_bindgen]
pub struct RunWrapper {
    run: FinishedRun,
}

#[wasm_bindgen]
impl RunWrapper {
    /// Parse, validate and run a scenario. Rejects with `{ valid: false, errors: [...] }`.
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str) -> Result<RunWrapper, JsValue> {
        robot_vacuum::run_scenario(text)
            .map(|run| Self { run })
            .map_err(|validation| {
                let rejected = Rejected {
                    valid: false,
                    errors: validation.errors().iter().map(|e| e.to_string()).collect(),
                };
                serde_wasm_bindgen::to_value(&rejected)
                    .unwrap_or_else(|_| JsValue::from_str(&validation.to_string()))
            })
    }

    /// The two-line result.
    pub fn output(&self) -> String {
        self.run.report().to_string()
    }

    /// `{ position, dirt_collected, bounds, original_dirt, trace }` for the page to draw.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&RunSummary::from(&self.run)).map_err(JsValue::from)
    }

    /// Number of playback frames, one per position in the trace.
    pub fn frame_count(&self) -> usize {
        self.run.replay().trace().len()
    }

    /// Text frame `index`, or `undefined` past the end. Rejects when the room is too large to draw.
    pub fn frame(&self, index: usize) -> Result<Option<String>, JsValue> {
        GridRenderer::default()
            .frame(&self.run.replay(), index)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}
