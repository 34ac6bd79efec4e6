//! UI module - custom-painted widgets used by the main view

pub mod components;
