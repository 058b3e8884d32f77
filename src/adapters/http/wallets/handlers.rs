use axum::extract::State;
use axum::Json;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{
    ChargeMonthlyResponse, PostTransactionRequest, TransactionCreatedResponse,
    TransactionListResponse, TransactionResponse, WalletListResponse, WalletResponse,
    TRANSACTIONS_LIMIT,
};
use crate::domain::access::{AccessContext, ClubRole};
use crate::domain::foundation::ErrorCode;
use crate::domain::wallet::TransactionReason;
use crate::ports::ClubScope;

fn require_admin(access: &AccessContext) -> Result<(), ApiError> {
    if access.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::forbidden())
    }
}

fn admin_scope(access: &AccessContext) -> ClubScope {
    if access.is_superadmin {
        ClubScope::All
    } else {
        ClubScope::AdminOf(access.user_id)
    }
}

pub async fn list_wallets(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<WalletListResponse>, ApiError> {
    require_admin(&access)?;
    let wallets = state.wallets.list(admin_scope(&access)).await?;
    Ok(Json(WalletListResponse {
        wallets: wallets.into_iter().map(WalletResponse::from).collect(),
    }))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<TransactionListResponse>, ApiError> {
    require_admin(&access)?;
    let transactions = state
        .wallets
        .list_transactions(admin_scope(&access), TRANSACTIONS_LIMIT)
        .await?;
    Ok(Json(TransactionListResponse {
        transactions: transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    }))
}

/// Posts a manual ledger entry. Billing reasons are rejected here; only
/// the billing run may write them.
pub async fn post_transaction(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Json(body): Json<PostTransactionRequest>,
) -> Result<Json<TransactionCreatedResponse>, ApiError> {
    require_admin(&access)?;

    let invalid = || ApiError::validation("Wallet, amount, and reason are required.");
    let wallet_id = body.wallet_id.ok_or_else(invalid)?;
    let amount = body.amount.filter(|a| !a.is_zero()).ok_or_else(invalid)?;
    let reason = body
        .reason
        .as_deref()
        .and_then(TransactionReason::parse)
        .filter(TransactionReason::is_manual)
        .ok_or_else(invalid)?;

    let wallet = state
        .wallets
        .find(wallet_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::WalletNotFound, "Wallet not found."))?;
    state
        .access_resolver
        .require_club_role(&access, wallet.club_id, &[ClubRole::Admin])
        .await?;

    let transaction_id = state
        .wallets
        .post_transaction(
            wallet_id,
            amount,
            reason,
            body.note.as_deref().map(str::trim).filter(|n| !n.is_empty()),
            Some(access.user_id),
        )
        .await?;
    Ok(Json(TransactionCreatedResponse { transaction_id }))
}

/// Debits the configured monthly fee from every wallet in scope,
/// unconditionally. The idempotent per-month settlement lives under
/// `/api/billing-runs`; this is the admin's manual hammer.
pub async fn charge_monthly(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<ChargeMonthlyResponse>, ApiError> {
    require_admin(&access)?;

    let settings = state.settings.get().await?;
    let fee = settings
        .monthly_fee
        .filter(|fee| fee.is_sign_positive() && !fee.is_zero())
        .ok_or_else(|| ApiError::validation("Monthly fee not configured."))?;

    let scope = admin_scope(&access);
    let wallets = state.wallets.list(scope).await?;
    if wallets.is_empty() {
        return Err(ApiError::validation("No wallets available."));
    }

    let billed = state
        .wallets
        .debit_all(scope, fee, "Monthly fee", access.user_id)
        .await?;
    Ok(Json(ChargeMonthlyResponse { ok: true, billed }))
}
