//! Wallet backed by the `sui` command-line client and its keystore.

use async_trait::async_trait;
use betgame_core::builder::{Argument, CallArg, Command, PureValue};
use betgame_core::units::format_mist;
use betgame_core::{
    AccountProvider, BetGameError, Result, SubmissionReceipt, SuiAddress, TransactionDigest,
    TransactionIntent, TransactionSigner,
};
use dialoguer::Confirm;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::process::Command as Process;

pub struct SuiCliWallet {
    binary: PathBuf,
    gas_budget: Option<u64>,
    confirm: bool,
}

impl SuiCliWallet {
    pub fn new(binary: PathBuf, gas_budget: Option<u64>) -> Self {
        Self {
            binary,
            gas_budget,
            confirm: true,
        }
    }

    /// Skip the interactive confirmation before signing.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.confirm = !yes;
        self
    }

    async fn ask_user(&self, intent: &TransactionIntent) -> Result<bool> {
        let prompt = match (intent.bet_amount(), intent.bet_choice()) {
            (Some(amount), Some(choice)) => {
                format!("Sign bet of {} on {}?", format_mist(amount), choice)
            }
            _ => "Sign transaction?".to_string(),
        };

        tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .map_err(|e| BetGameError::submission(format!("Prompt failed: {}", e)))
        })
        .await
        .map_err(|e| BetGameError::internal(format!("Prompt task failed: {}", e)))?
    }
}

#[async_trait]
impl AccountProvider for SuiCliWallet {
    async fn current_account(&self) -> Option<SuiAddress> {
        let output = Process::new(&self.binary)
            .args(["client", "active-address"])
            .output()
            .await;

        match output {
            Ok(out) if out.status.success() => {
                let stdout = String::from_utf8_lossy(&out.stdout);
                match stdout.trim().parse() {
                    Ok(address) => Some(address),
                    Err(e) => {
                        tracing::warn!("Unexpected active address '{}': {}", stdout.trim(), e);
                        None
                    }
                }
            }
            Ok(out) => {
                tracing::debug!(
                    "sui client active-address failed: {}",
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                None
            }
            Err(e) => {
                tracing::warn!("Could not run {}: {}", self.binary.display(), e);
                None
            }
        }
    }
}

#[async_trait]
impl TransactionSigner for SuiCliWallet {
    async fn sign_and_execute(&self, intent: &TransactionIntent) -> Result<SubmissionReceipt> {
        if self.confirm && !self.ask_user(intent).await? {
            return Err(BetGameError::SignatureDeclined);
        }

        let args = ptb_args(intent, self.gas_budget);
        tracing::debug!("Running {} {}", self.binary.display(), args.join(" "));

        let output = Process::new(&self.binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                BetGameError::submission(format!("Could not run {}: {}", self.binary.display(), e))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if let Some(digest) = parse_digest(&stdout) {
            return Ok(SubmissionReceipt { digest });
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        Err(BetGameError::submission(if reason.is_empty() {
            format!("sui client ptb exited with {}", output.status)
        } else {
            reason
        }))
    }
}

fn render_input(intent: &TransactionIntent, idx: u16) -> String {
    match intent.inputs.get(idx as usize) {
        Some(CallArg::Object(id)) => format!("@{}", id),
        Some(CallArg::Pure(PureValue::U64(v))) => format!("{}u64", v),
        Some(CallArg::Pure(PureValue::U8(v))) => format!("{}u8", v),
        None => format!("<missing input {}>", idx),
    }
}

fn render_arg(intent: &TransactionIntent, arg: Argument) -> String {
    match arg {
        Argument::GasCoin => "gas".to_string(),
        Argument::Input(idx) => render_input(intent, idx),
        Argument::Result(cmd) => format!("result_{}", cmd),
        Argument::NestedResult(cmd, idx) => format!("result_{}.{}", cmd, idx),
    }
}

/// Renders the intent as `sui client ptb` arguments.
pub fn ptb_args(intent: &TransactionIntent, gas_budget: Option<u64>) -> Vec<String> {
    let referenced: HashSet<u16> = intent
        .commands
        .iter()
        .flat_map(|cmd| match cmd {
            Command::SplitCoins { coin, amounts } => {
                std::iter::once(*coin).chain(amounts.iter().copied()).collect::<Vec<_>>()
            }
            Command::MoveCall { arguments, .. } => arguments.clone(),
        })
        .filter_map(|arg| match arg {
            Argument::Result(cmd) | Argument::NestedResult(cmd, _) => Some(cmd),
            _ => None,
        })
        .collect();

    let mut args = vec!["client".to_string(), "ptb".to_string()];

    for (i, cmd) in intent.commands.iter().enumerate() {
        match cmd {
            Command::SplitCoins { coin, amounts } => {
                let amounts: Vec<String> =
                    amounts.iter().map(|a| render_arg(intent, *a)).collect();
                args.push("--split-coins".to_string());
                args.push(render_arg(intent, *coin));
                args.push(format!("[{}]", amounts.join(",")));
            }
            Command::MoveCall { target, arguments } => {
                args.push("--move-call".to_string());
                args.push(target.to_string());
                args.extend(arguments.iter().map(|a| render_arg(intent, *a)));
            }
        }

        if referenced.contains(&(i as u16)) {
            args.push("--assign".to_string());
            args.push(format!("result_{}", i));
        }
    }

    if let Some(budget) = gas_budget {
        args.push("--gas-budget".to_string());
        args.push(budget.to_string());
    }
    args.push("--json".to_string());
    args
}

/// Pulls the transaction digest out of `--json` output, skipping any banner
/// lines the CLI prints first.
fn parse_digest(stdout: &str) -> Option<TransactionDigest> {
    let start = stdout.find('{')?;
    let value: serde_json::Value = serde_json::from_str(stdout[start..].trim()).ok()?;
    value
        .get("digest")
        .and_then(|d| d.as_str())
        .and_then(|d| d.parse().ok())
}
