//! Request shaping for Tamil text assist.
//!
//! Covers everything that happens before and after the generation call:
//! validating that input is Tamil script, rendering the mode-specific
//! instruction, and describing and unwrapping the expected response shape.

#![warn(missing_docs, clippy::pedantic)]

pub mod contract;
pub mod instructions;
pub mod template;
pub mod validator;

pub use contract::{
    CORRECTED_TEXT_FIELD, ContractError, ContractResult, OutputContract, ResponseSchema,
    SchemaType,
};
pub use instructions::{GRAMMAR_INSTRUCTION, InstructionSet, SUMMARY_INSTRUCTION};
pub use template::{PromptTemplate, TemplateBuilder, TemplateError, TemplateResult};
pub use validator::{NOT_TAMIL_MESSAGE, ValidationError, is_tamil_text, validate};
