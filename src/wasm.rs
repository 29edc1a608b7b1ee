//! JavaScript bindings.

use crate::anneal::{AnnealConfig, Annealer};
use crate::spin::SpinSystem;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnealSummary {
    initial_energy: f64,
    final_energy: f64,
    spins: Vec<f64>,
    magnetization: f64,
    accepted: usize,
    proposals: usize,
}

/// Builds a system, anneals it with the reference schedule, and returns a
/// summary object.
#[wasm_bindgen(js_name = annealSpinSystem)]
pub fn anneal_spin_system(n: u32, seed: u32, steps: u32, anneal_seed: u32) -> Result<JsValue, JsValue> {
    let mut system = SpinSystem::new(n as usize, u64::from(seed)).map_err(js_error)?;
    let config = AnnealConfig::new(steps as usize, u64::from(anneal_seed));
    let result = Annealer::run(&mut system, &config).map_err(js_error)?;
    let summary = AnnealSummary {
        initial_energy: result.initial_energy,
        final_energy: result.final_energy,
        spins: system.spin_values(),
        magnetization: system.magnetization(),
        accepted: result.accepted,
        proposals: result.proposals,
    };
    serde_wasm_bindgen::to_value(&summary).map_err(js_error)
}

/// A spin system handle for callers that perturb and anneal in several calls.
#[wasm_bindgen]
pub struct WasmSpinSystem {
    inner: SpinSystem,
}

#[wasm_bindgen]
impl WasmSpinSystem {
    #[wasm_bindgen(constructor)]
    pub fn new(n: u32, seed: u32) -> Result<WasmSpinSystem, JsValue> {
        let inner = SpinSystem::new(n as usize, u64::from(seed)).map_err(js_error)?;
        Ok(Self { inner })
    }

    pub fn energy(&self) -> f64 {
        self.inner.energy()
    }

    pub fn anneal(&mut self, steps: u32, seed: u32) -> f64 {
        self.inner.anneal(steps as usize, u64::from(seed))
    }

    pub fn spins(&self) -> Vec<f64> {
        self.inner.spin_values()
    }

    #[wasm_bindgen(js_name = addThermalNoise)]
    pub fn add_thermal_noise(&mut self, temperature: f64, seed: u32) -> Result<u32, JsValue> {
        let flipped = self
            .inner
            .add_thermal_noise(temperature, u64::from(seed))
            .map_err(js_error)?;
        Ok(flipped as u32)
    }

    #[wasm_bindgen(js_name = introduceExternalField)]
    pub fn introduce_external_field(&mut self, strength: f64) -> Result<(), JsValue> {
        self.inner.introduce_external_field(strength).map_err(js_error)
    }

    #[wasm_bindgen(js_name = scaleCoupling)]
    pub fn scale_coupling(&mut self, factor: f64) -> Result<(), JsValue> {
        self.inner.scale_coupling(factor).map_err(js_error)
    }

    /// Full state as a plain object, for snapshots.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(js_error)
    }
}
