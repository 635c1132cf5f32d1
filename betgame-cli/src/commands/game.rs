use super::Session;
use crate::wallet::ptb_args;
use betgame_core::units::{format_mist, parse_sui};
use betgame_core::{
    build_place_bet, BetController, BetGameError, BetReceipt, BetRequest, DisplayState,
    ExecutionStatus, GameState, Result, SubmissionStatus,
};
use comfy_table::{presets::UTF8_FULL, Table};

fn print_game(session: &Session, state: &GameState) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Game".to_string(), session.game_id.to_string()]);
    table.add_row(vec!["Total Bets".to_string(), format_mist(state.total_bets)]);
    table.add_row(vec![
        "Carry Over".to_string(),
        format!("{} MIST", state.carry_over),
    ]);
    table.add_row(vec!["Status".to_string(), state.status_label().to_string()]);
    if let Some(owner) = &state.owner {
        table.add_row(vec!["Owner".to_string(), owner.to_string()]);
    }
    if let Some(object_owner) = &state.object_owner {
        table.add_row(vec!["Object Owner".to_string(), object_owner.to_string()]);
    }
    table.add_row(vec!["Version".to_string(), state.version.to_string()]);
    table.add_row(vec![
        "Fetched At".to_string(),
        state.fetched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    ]);

    println!("{}", table);
}

fn print_display_state(session: &Session, controller: &BetController) {
    match controller.display_state() {
        DisplayState::Ready(state) => print_game(session, &state),
        DisplayState::Loading => println!("Loading..."),
        DisplayState::NotFound(id) => println!("Not found: {}", id),
        DisplayState::Error(msg) => println!("Error: {}", msg),
    }
}

pub async fn show_game(session: &Session) -> Result<()> {
    let controller = session.controller(true)?;

    println!(
        "Bet Game {} on {}",
        session.game_id.short(),
        session.network.network
    );
    let result = controller.refresh().await;
    print_display_state(session, &controller);
    result.map(|_| ())
}

/// Converts the entered amount to MIST. This is the only place whole-coin
/// input is accepted.
fn amount_in_mist(amount: &str, in_sui: bool) -> Result<u64> {
    if in_sui {
        return parse_sui(amount);
    }

    amount.trim().parse().map_err(|_| {
        BetGameError::config(format!(
            "Invalid amount '{}': expected MIST as a whole number (use --sui for SUI)",
            amount
        ))
    })
}

/// An executed transaction whose move call aborted still counts as a failed bet.
fn receipt_outcome(receipt: BetReceipt) -> Result<()> {
    match receipt.execution {
        ExecutionStatus::Success => Ok(()),
        ExecutionStatus::Failure { error } => Err(BetGameError::ExecutionFailed {
            digest: receipt.digest,
            error,
        }),
    }
}

pub async fn place_bet(
    session: &Session,
    amount: &str,
    choice: i64,
    in_sui: bool,
    assume_yes: bool,
    dry_run: bool,
) -> Result<()> {
    let amount = amount_in_mist(amount, in_sui)?;
    let bet = BetRequest::new(amount, choice).validate(&session.limits)?;

    if dry_run {
        let intent = build_place_bet(&session.network.call_target(), session.game_id, bet);

        println!("{}", serde_json::to_string_pretty(&intent)?);
        println!();
        println!("sui {}", ptb_args(&intent, None).join(" "));
        return Ok(());
    }

    let controller = session.controller(assume_yes)?;

    if let Err(e) = controller.refresh().await {
        tracing::warn!("Could not load game state before betting: {}", e);
    }
    print_display_state(session, &controller);

    println!(
        "Placing bet of {} ({} MIST) on {}...",
        format_mist(amount),
        amount,
        choice
    );

    let mut status = controller.subscribe_status();
    let submit = controller.submit(bet.amount(), i64::from(bet.choice()));
    tokio::pin!(submit);

    let result = loop {
        tokio::select! {
            result = &mut submit => break result,
            changed = status.changed() => {
                if changed.is_err() {
                    break submit.await;
                }
                let current = *status.borrow_and_update();
                if current != SubmissionStatus::Idle {
                    println!("  ... {}", current);
                }
            }
        }
    };

    match result {
        Ok(receipt) => {
            if receipt.execution.is_success() {
                println!("Bet placed successfully!");
            }
            println!("Transaction digest: {}", receipt.digest);
            println!();

            if !receipt.refreshed {
                if let Some(err) = controller.last_error() {
                    println!("Could not refresh game state: {}", err);
                }
            }
            print_display_state(session, &controller);
            receipt_outcome(receipt)
        }
        Err(e @ BetGameError::ConfirmationUnknown { .. }) => {
            print_display_state(session, &controller);
            Err(e)
        }
        Err(e) => Err(e),
    }
}
