use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionKind, TransactionStatus};
use crate::error::AppError;
use crate::validation::{
    optional_text, validate_required, DESCRIPTION_MAX_LEN, REFERENCE_ID_MAX_LEN, USER_ID_MAX_LEN,
};
use crate::AppState;

/// Body accepted by the submission endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub amount: i64,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub user_id: Option<String>,
    pub transaction_id: Option<String>,
}

impl SubmitRequest {
    fn into_transaction(self, kind: TransactionKind) -> Result<Transaction, AppError> {
        if let Some(declared) = self.kind {
            if declared != kind {
                return Err(AppError::Validation(format!(
                    "type: '{}' does not match endpoint '{}'",
                    declared, kind
                )));
            }
        }

        let description = optional_text("description", self.description, DESCRIPTION_MAX_LEN)?;
        let user_id = optional_text("userId", self.user_id, USER_ID_MAX_LEN)?;
        let reference_id =
            optional_text("transactionId", self.transaction_id, REFERENCE_ID_MAX_LEN)?;

        Ok(Transaction::new(kind, self.amount, description)
            .with_user_id(user_id)
            .with_reference_id(reference_id))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub tx_hash: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(rename = "txId")]
    pub tx_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub tx_hash: String,
    pub status: TransactionStatus,
}

pub async fn trade(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(request) = payload?;
    let tx_hash = state
        .service
        .trade(request.into_transaction(TransactionKind::Trade)?)
        .await?;
    Ok(Json(SubmitResponse { tx_hash }))
}

pub async fn pay(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(request) = payload?;
    let tx_hash = state
        .service
        .pay(request.into_transaction(TransactionKind::Pay)?)
        .await?;
    Ok(Json(SubmitResponse { tx_hash }))
}

pub async fn anchor_receipt(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(request) = payload?;
    let tx_hash = state
        .service
        .anchor_receipt(request.into_transaction(TransactionKind::AnchorReceipt)?)
        .await?;
    Ok(Json(SubmitResponse { tx_hash }))
}

pub async fn get_status(
    State(state): State<AppState>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let Query(query) = query?;
    let tx_id = query
        .tx_id
        .map(|id| id.trim().to_string())
        .unwrap_or_default();
    validate_required("txId", &tx_id)
        .map_err(|_| AppError::BadRequest("Missing txId parameter".to_string()))?;

    let status = state.service.get_status(&tx_id).await?;
    Ok(Json(StatusResponse {
        tx_hash: tx_id,
        status,
    }))
}
