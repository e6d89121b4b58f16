use wasm_bindgen::prelude::*;
mod api;
pub mod error;
mod interop;

/// One editable path, exposed to the UI layer.
#[wasm_bindgen]
pub struct PathEditor { pub(crate) inner: penpath::PathGraph }

impl PathEditor {
    pub fn rs_new() -> PathEditor { PathEditor { inner: penpath::PathGraph::new() } }
    pub fn rs_from_graph(inner: penpath::PathGraph) -> PathEditor { PathEditor { inner } }
    pub fn graph(&self) -> &penpath::PathGraph { &self.inner }
}
