// Assessment JSON API
use serde::{Deserialize, Serialize};

use crate::classify::ClassifierInput;
use crate::models::{AssessmentRecord, FitnessTests, Skinfolds, Submission};
use crate::pipeline::RecordPipeline;
use crate::SCHEMA_VERSION;

/// Request envelope sent by the embedding host
#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    pub schema_version: u8,
    pub request_type: AssessmentRequestType,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum AssessmentRequestType {
    /// Full pipeline run over one form submission
    Assess { submission: Submission },

    /// Classifier only, for previewing a recommendation
    Classify { input: ClassifierInput },

    /// Rating engine only
    Rate {
        tests: FitnessTests,
        #[serde(default)]
        skinfolds: Skinfolds,
    },
}

/// Response envelope
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub schema_version: u8,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<AssessmentResponseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum AssessmentResponseType {
    Assessment {
        record: AssessmentRecord,
    },
    Classification {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        justification: Option<String>,
    },
    Rating {
        rating: String,
        weak_areas: Vec<WeakAreaAdvice>,
    },
}

#[derive(Debug, Serialize)]
pub struct WeakAreaAdvice {
    pub area: String,
    pub recommendation: String,
}

impl AssessmentResponse {
    fn ok(response_type: AssessmentResponseType) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            success: true,
            response_type: Some(response_type),
            error_message: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            success: false,
            response_type: None,
            error_message: Some(message),
        }
    }
}

/// Parse a request, run it against the pipeline, and serialize the response.
/// Always returns valid JSON, errors included.
pub fn process_assessment_json(pipeline: &RecordPipeline, request_json: &str) -> String {
    let response = match serde_json::from_str::<AssessmentRequest>(request_json) {
        Ok(request) => handle(pipeline, request),
        Err(err) => AssessmentResponse::error(format!("Invalid request: {err}")),
    };
    serde_json::to_string(&response)
        .unwrap_or_else(|err| format!(r#"{{"success":false,"error_message":"{err}"}}"#))
}

fn handle(pipeline: &RecordPipeline, request: AssessmentRequest) -> AssessmentResponse {
    if request.schema_version != SCHEMA_VERSION {
        return AssessmentResponse::error(format!(
            "Unsupported schema version: {}",
            request.schema_version
        ));
    }

    match request.request_type {
        AssessmentRequestType::Assess { submission } => match pipeline.assess(submission) {
            Ok(record) => AssessmentResponse::ok(AssessmentResponseType::Assessment { record }),
            Err(err) => AssessmentResponse::error(err.to_string()),
        },
        AssessmentRequestType::Classify { input } => {
            let classification = pipeline.classify_only(&input);
            AssessmentResponse::ok(AssessmentResponseType::Classification {
                label: classification.label,
                justification: classification.justification,
            })
        }
        AssessmentRequestType::Rate { tests, skinfolds } => {
            let report = pipeline.rate_only(&tests, &skinfolds);
            let weak_areas = report
                .recommendations()
                .into_iter()
                .map(|(area, recommendation)| WeakAreaAdvice {
                    area: area.as_str().to_string(),
                    recommendation: recommendation.to_string(),
                })
                .collect();
            AssessmentResponse::ok(AssessmentResponseType::Rating {
                rating: report.rating.as_str().to_string(),
                weak_areas,
            })
        }
    }
}
