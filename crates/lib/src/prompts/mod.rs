//! # Prompt Template Modules
//!
//! This module organizes the prompt templates sent to the completion model.

pub mod legal;
