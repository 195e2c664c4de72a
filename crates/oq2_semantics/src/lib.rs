// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

//! Semantic analysis of OpenQASM 2.
//!
//! This crate turns the syntax tree from `oq2_syntax` into an [`asg::Program`]. Register names
//! are resolved to identity tokens for individual qubits and bits, parameter expressions are
//! kept as exact symbolic trees, and gate definitions are kept as templates over their formal
//! arguments.
//!
//! The analysis is a single pass in source order. It stops at the first error.

// Organization of API
// asg.rs holds the program model. syntax_to_semantics.rs builds it from the syntax tree.
// symbols.rs and context.rs hold the state of one build.

pub mod asg;
pub mod context;
pub mod semantic_error;
pub mod symbols;
pub mod syntax_to_semantics;
pub mod validate;

pub use rowan::{TextRange, TextSize};
