//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! This binary generates Swift, Kotlin, Python, and Ruby bindings for the
//! meal-planner library, for the app shells that render the planner.
//!
//! ## Usage
//!
//! Generate Swift bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libmeal_planner.so --language swift --out-dir ./bindings
//! ```
//!
//! Generate Python bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libmeal_planner.so --language python --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
