//! Balance and settle-up CLI commands

use crate::config::Settings;
use crate::display::{format_balances, format_settlement_plan};
use crate::error::BillsplitResult;
use crate::ledger::Ledger;
use crate::services::{BalanceService, SettlementService};

/// Show each participant's net balance
pub fn handle_balances_command(ledger: &Ledger, settings: &Settings) -> BillsplitResult<()> {
    let balances = BalanceService::new(ledger).balances()?;
    println!(
        "{}",
        format_balances(&balances, &ledger.participants()?, settings)
    );
    Ok(())
}

/// Show the transfers that settle the group
pub fn handle_settle_command(ledger: &Ledger, settings: &Settings) -> BillsplitResult<()> {
    let result = SettlementService::new(ledger).settle_up()?;
    print!(
        "{}",
        format_settlement_plan(&result.plan, &ledger.participants()?, settings)
    );
    Ok(())
}
