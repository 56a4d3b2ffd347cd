// src/tests/mod.rs - Unit tests for bitcursor

#[cfg(test)]
pub mod bits_tests;




#[cfg(test)]
pub mod test_utils {
    pub const T: bool = true;
    pub const F: bool = false;

    pub fn init_logger() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .try_init();
    }
}
