//! JSON API surface for embedding hosts
//!
//! String-in/string-out entry points with a versioned request/response
//! envelope, so a form frontend or script can drive the pipeline without
//! linking against the crate's types.

mod assessment_json;

pub use assessment_json::{
    process_assessment_json, AssessmentRequest, AssessmentRequestType, AssessmentResponse,
    AssessmentResponseType, WeakAreaAdvice,
};
