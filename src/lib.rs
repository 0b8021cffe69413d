#![doc = "dcelcheck: build a DCEL from a polygon mesh and check it is a planar subdivision"]
pub mod cli;
pub mod commands;
pub mod io;
