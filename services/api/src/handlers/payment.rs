use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use chitfund_domain::status::PaymentStatus;

use crate::domain::types::{ActorContext, Payment, PaymentPatch};
use crate::error::ChitServiceError;
use crate::state::AppState;
use crate::usecase::payment::{
    ListPaymentsUseCase, RecordPaymentInput, RecordPaymentUseCase, UpdatePaymentUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PaymentResponse {
    pub id: i32,
    pub chit_group_id: i32,
    pub user_id: i32,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub month_number: i32,
    pub status: PaymentStatus,
    #[serde(serialize_with = "chitfund_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            chit_group_id: payment.chit_group_id,
            user_id: payment.user_id,
            amount: payment.amount,
            payment_date: payment.payment_date,
            month_number: payment.month_number,
            status: payment.status,
            created_at: payment.created_at,
        }
    }
}

// ── GET /payments ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PaymentListQuery {
    pub chit_group_id: Option<i32>,
}

pub async fn list_payments(
    actor: ActorContext,
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> Result<Json<Vec<PaymentResponse>>, ChitServiceError> {
    let uc = ListPaymentsUseCase {
        groups: state.store(),
        members: state.store(),
        payments: state.store(),
    };
    let payments = uc.execute(&actor, query.chit_group_id).await?;
    Ok(Json(payments.into_iter().map(PaymentResponse::from).collect()))
}

// ── POST /payments ───────────────────────────────────────────────────────────

fn default_payment_status() -> PaymentStatus {
    PaymentStatus::Pending
}

#[derive(Deserialize)]
pub struct RecordPaymentRequest {
    pub chit_group_id: i32,
    pub user_id: i32,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub month_number: i32,
    #[serde(default = "default_payment_status")]
    pub status: PaymentStatus,
}

pub async fn record_payment(
    actor: ActorContext,
    State(state): State<AppState>,
    Json(body): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ChitServiceError> {
    let uc = RecordPaymentUseCase {
        groups: state.store(),
        members: state.store(),
        users: state.store(),
        payments: state.store(),
        notifications: state.store(),
    };
    let payment = uc
        .execute(
            &actor,
            RecordPaymentInput {
                chit_group_id: body.chit_group_id,
                user_id: body.user_id,
                amount: body.amount,
                payment_date: body.payment_date,
                month_number: body.month_number,
                status: body.status,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(payment.into())))
}

// ── PUT /payments/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePaymentRequest {
    pub amount: Option<i64>,
    pub payment_date: Option<NaiveDate>,
    pub month_number: Option<i32>,
    pub status: Option<PaymentStatus>,
}

pub async fn update_payment(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdatePaymentRequest>,
) -> Result<Json<PaymentResponse>, ChitServiceError> {
    let uc = UpdatePaymentUseCase {
        groups: state.store(),
        payments: state.store(),
    };
    let patch = PaymentPatch {
        amount: body.amount,
        payment_date: body.payment_date,
        month_number: body.month_number,
        status: body.status,
    };
    let payment = uc.execute(&actor, id, patch).await?;
    Ok(Json(payment.into()))
}
