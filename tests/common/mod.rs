#![allow(dead_code)]

use std::sync::Once;

pub mod cli;
pub mod trello;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        board_export::logging::init_test_logging();
    });
}
