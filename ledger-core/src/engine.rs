use crate::{
    LedgerError,
    models::{Amount, Balance, InvalidInput, TransferOutcome, TransferRequest, ValidTransfer},
    ports::{LedgerStore, UnitOfWork},
};
use tracing::{Level, event};

/// Moves money between two accounts as one indivisible operation.
///
/// Each call opens its own unit of work, locks both account rows in
/// ascending id order, re-reads the balances under that lock, and then
/// either commits a debit and a credit together or rolls back having
/// changed nothing. Concurrent transfers touching the same account are
/// therefore serialized by the store, and opposite transfers (`A→B` and
/// `B→A`) cannot deadlock since they acquire rows in the same order.
///
/// The engine itself holds no state beside the store handle; clone it
/// freely.
#[derive(Debug, Clone)]
pub struct TransferEngine<R> {
    repository: R,
}

impl<R> TransferEngine<R> {
    /// Wrap a store handle.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: LedgerStore + Sync> TransferEngine<R> {
    /// Transfer `request.amount` from `request.from` to `request.to`.
    ///
    /// Input is validated before the store is touched. Dropping the returned
    /// future before the unit of work has been opened (including while it
    /// waits for a busy store) cancels the transfer with no effect. Once the
    /// unit is open it runs on its own task, and dropping the future no
    /// longer stops it: it completes (commit or rollback) regardless.
    ///
    /// # Returns
    ///
    /// The balances of both accounts right after the commit.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if the amount is not positive
    /// - [`LedgerError::SameAccount`] if both ids are equal
    /// - [`LedgerError::AccountNotFound`] if either account is missing
    /// - [`LedgerError::InsufficientFunds`] if the source cannot cover the amount
    /// - [`LedgerError::StorageUnavailable`] if the store fails or times out
    pub async fn transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransferOutcome, LedgerError<R::Error>> {
        let transfer = validate(request)?;

        let outcome = run_detached(&self.repository, move |mut unit| async move {
            let result = apply(&mut unit, transfer).await;
            finish(unit, result).await
        })
        .await;

        match &outcome {
            Ok(balances) => event!(
                Level::INFO,
                from = %transfer.from,
                to = %transfer.to,
                amount = %transfer.amount,
                from_balance = %balances.from_balance,
                to_balance = %balances.to_balance,
                "transfer committed"
            ),
            Err(err) if err.is_retryable() => {
                event!(Level::WARN, from = %transfer.from, to = %transfer.to, err = %err, "transfer failed")
            }
            Err(err) => {
                event!(Level::DEBUG, from = %transfer.from, to = %transfer.to, err = %err, "transfer rejected")
            }
        }

        outcome
    }
}

/// The checks that need no storage access.
fn validate<E>(request: TransferRequest) -> Result<ValidTransfer, LedgerError<E>> {
    let amount =
        Amount::new(request.amount).map_err(|_| LedgerError::InvalidAmount(request.amount))?;

    if request.from == request.to {
        return Err(LedgerError::SameAccount);
    }

    Ok(ValidTransfer {
        from: request.from,
        to: request.to,
        amount,
    })
}

async fn apply<U: UnitOfWork>(
    unit: &mut U,
    transfer: ValidTransfer,
) -> Result<TransferOutcome, LedgerError<U::Error>> {
    let order = transfer.lock_order();

    let mut locked = [Balance::ZERO; 2];
    for (balance, account_id) in locked.iter_mut().zip(order) {
        *balance = unit
            .get_balance(account_id)
            .await
            .map_err(LedgerError::StorageUnavailable)?
            .ok_or(LedgerError::AccountNotFound(account_id))?;
    }

    let (mut from_balance, mut to_balance) = if order[0] == transfer.from {
        (locked[0], locked[1])
    } else {
        (locked[1], locked[0])
    };

    let insufficient = |available| LedgerError::InsufficientFunds {
        account: transfer.from,
        required: transfer.amount.value(),
        available,
    };

    if !from_balance.covers(transfer.amount) {
        return Err(insufficient(from_balance));
    }

    for account_id in order {
        if account_id == transfer.from {
            from_balance = unit
                .apply_delta(account_id, -transfer.amount.value())
                .await
                .map_err(LedgerError::StorageUnavailable)?
                .ok_or_else(|| insufficient(from_balance))?;
        } else {
            to_balance = unit
                .apply_delta(account_id, transfer.amount.value())
                .await
                .map_err(LedgerError::StorageUnavailable)?
                .ok_or(InvalidInput::BalanceOverflow(account_id))?;
        }
    }

    Ok(TransferOutcome {
        from_balance,
        to_balance,
    })
}

/// Commit on success, roll back on any error.
pub(crate) async fn finish<U: UnitOfWork, T>(
    unit: U,
    result: Result<T, LedgerError<U::Error>>,
) -> Result<T, LedgerError<U::Error>>
where
    U::Error: std::fmt::Display,
{
    match result {
        Ok(value) => {
            unit.commit()
                .await
                .map_err(LedgerError::StorageUnavailable)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = unit.rollback().await {
                // the store discards the unit anyway once it is dropped
                event!(Level::ERROR, err = %rollback, "rollback failed");
            }
            Err(err)
        }
    }
}

/// Open a unit of work in the caller's task, then hand it to `work` on a task
/// of its own so that it cannot be abandoned halfway by a caller that goes
/// away. A caller dropped while the unit is still being opened leaves no
/// trace.
pub(crate) async fn run_detached<R, T, W, F>(
    repository: &R,
    work: W,
) -> Result<T, LedgerError<R::Error>>
where
    R: LedgerStore,
    W: FnOnce(R::Unit) -> F,
    F: Future<Output = Result<T, LedgerError<R::Error>>> + Send + 'static,
    T: Send + 'static,
{
    let unit = repository
        .begin()
        .await
        .map_err(LedgerError::StorageUnavailable)?;

    match tokio::spawn(work(unit)).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(_) => Err(LedgerError::Interrupted),
    }
}
