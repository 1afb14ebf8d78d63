//! Shared test harness modules for the Spiky CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::serve::{
    DEFAULT_DATABASE, DEFAULT_LISTEN, ServeArgs, ServeConfig, config_from_layers_for_test,
    resolve_serve_config,
};

mod helpers;
