//! One module per overlay widget. Each exposes `clock()` with the phases it
//! reads and a scene type built from `(label, size, rng)`.

pub mod biometric;
pub mod chroma;
pub mod crystal;
pub mod cyber_network;
pub mod dark_crystal;
pub mod digital_face;
pub mod ghost;
pub mod grid_face;
pub mod heart;
pub mod hologram;
pub mod interface;
pub mod jarvis;
pub mod lightning;
pub mod matrix;
pub mod matrix_hex;
pub mod matrix_storm;
pub mod nebula;
pub mod neural_network;
pub mod neural_scanner;
pub mod portal;
pub mod pulse_network;
pub mod quantum;
pub mod reactor;
pub mod ruby;
pub mod scanner;
pub mod tech_hud;
pub mod virtual_assistant;
pub mod wave;
