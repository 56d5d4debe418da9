// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Classification of Kubernetes API errors

/// Coarse class of a failed API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    NotFound,
    AlreadyExists,
    /// The server answered with a Status object
    Rejected { code: u16, message: String },
    /// Transport, TLS or decoding failures with no server status
    Other,
}

/// Sort a kube error into one of the classes we log differently
pub fn classify(error: &kube::Error) -> ApiFailure {
    match error {
        kube::Error::Api(status) if status.reason == "NotFound" || status.code == 404 => {
            ApiFailure::NotFound
        }
        kube::Error::Api(status) if status.reason == "AlreadyExists" => ApiFailure::AlreadyExists,
        kube::Error::Api(status) => ApiFailure::Rejected {
            code: status.code,
            message: status.message.clone(),
        },
        _ => ApiFailure::Other,
    }
}
