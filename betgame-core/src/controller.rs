use crate::builder::build_place_bet;
use crate::chain::{AccountProvider, ConfirmationWaiter, ObjectSource, TransactionSigner};
use crate::error::{BetGameError, Result};
use crate::reader::GameStateReader;
use crate::types::{ExecutionStatus, GameState, MoveCallTarget, ObjectId, TransactionDigest};
use crate::validator::{BetLimits, BetRequest};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Where the single in-flight bet currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Idle,
    Building,
    AwaitingSignature,
    AwaitingConfirmation,
    Refreshing,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Building => "building transaction",
            SubmissionStatus::AwaitingSignature => "awaiting signature",
            SubmissionStatus::AwaitingConfirmation => "awaiting confirmation",
            SubmissionStatus::Refreshing => "refreshing game state",
        };
        f.write_str(label)
    }
}

/// Best-known game state for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Ready(GameState),
    NotFound(ObjectId),
    Error(String),
}

impl DisplayState {
    pub fn game(&self) -> Option<&GameState> {
        match self {
            DisplayState::Ready(state) => Some(state),
            _ => None,
        }
    }
}

/// Outcome of a bet that reached the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetReceipt {
    pub digest: TransactionDigest,
    pub execution: ExecutionStatus,
    /// False when the post-confirmation read failed; see `last_error`.
    pub refreshed: bool,
}

/// External collaborators the controller drives.
#[derive(Clone)]
pub struct Facilities {
    pub objects: Arc<dyn ObjectSource>,
    pub account: Arc<dyn AccountProvider>,
    pub signer: Arc<dyn TransactionSigner>,
    pub confirmer: Arc<dyn ConfirmationWaiter>,
}

/// Holds the status slot for one lifecycle and hands it back on drop.
struct InFlight<'a> {
    status: &'a watch::Sender<SubmissionStatus>,
}

impl InFlight<'_> {
    fn advance(&self, next: SubmissionStatus) {
        let prev = self.status.send_replace(next);
        tracing::debug!("Bet status: {} -> {}", prev, next);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let prev = self.status.send_replace(SubmissionStatus::Idle);
        tracing::debug!("Bet status: {} -> {}", prev, SubmissionStatus::Idle);
    }
}

/// Drives one wager at a time through validate, build, sign, confirm and refresh
/// for a single game object.
pub struct BetController {
    game_id: ObjectId,
    target: MoveCallTarget,
    limits: BetLimits,
    reader: GameStateReader,
    account: Arc<dyn AccountProvider>,
    signer: Arc<dyn TransactionSigner>,
    confirmer: Arc<dyn ConfirmationWaiter>,
    status: watch::Sender<SubmissionStatus>,
    display: RwLock<DisplayState>,
    last_error: RwLock<Option<String>>,
}

impl BetController {
    pub fn new(game_id: ObjectId, target: MoveCallTarget, facilities: Facilities) -> Self {
        let (status, _) = watch::channel(SubmissionStatus::Idle);

        Self {
            game_id,
            target,
            limits: BetLimits::default(),
            reader: GameStateReader::new(facilities.objects),
            account: facilities.account,
            signer: facilities.signer,
            confirmer: facilities.confirmer,
            status,
            display: RwLock::new(DisplayState::Loading),
            last_error: RwLock::new(None),
        }
    }

    pub fn with_limits(mut self, limits: BetLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn game_id(&self) -> ObjectId {
        self.game_id
    }

    pub fn target(&self) -> &MoveCallTarget {
        &self.target
    }

    pub fn limits(&self) -> &BetLimits {
        &self.limits
    }

    pub fn status(&self) -> SubmissionStatus {
        *self.status.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.status() != SubmissionStatus::Idle
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    pub fn display_state(&self) -> DisplayState {
        self.display.read().clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// Loads the game state for display. Only runs while idle.
    pub async fn refresh(&self) -> Result<GameState> {
        let flight = self.try_claim(SubmissionStatus::Refreshing)?;

        let result = self.reader.read(&self.game_id).await;
        let outcome = match result {
            Ok(state) => {
                *self.display.write() = DisplayState::Ready(state.clone());
                Ok(state)
            }
            Err(e) => {
                let display = match &e {
                    BetGameError::GameNotFound { id } => DisplayState::NotFound(*id),
                    other => DisplayState::Error(other.to_string()),
                };
                *self.display.write() = display;
                Err(self.surface(e))
            }
        };

        drop(flight);
        outcome
    }

    /// Places a bet of `amount` MIST on `choice`.
    ///
    /// Rejected with [`BetGameError::Busy`] while another bet or refresh is
    /// running. Once the signer accepts the transaction the game state is
    /// re-read even if waiting for finality fails.
    pub async fn submit(&self, amount: u64, choice: i64) -> Result<BetReceipt> {
        let current = self.status();
        if current != SubmissionStatus::Idle {
            return Err(BetGameError::Busy(current));
        }

        let bet = BetRequest::new(amount, choice)
            .validate(&self.limits)
            .map_err(|e| self.surface(e.into()))?;

        // Claimed before the first await; the account lookup runs as Building.
        let flight = self.try_claim(SubmissionStatus::Building)?;
        *self.last_error.write() = None;

        let sender = match self.account.current_account().await {
            Some(sender) => sender,
            None => return Err(self.surface(BetGameError::NoAccount)),
        };

        tracing::info!(
            "Placing bet of {} MIST on {} in game {} from {}",
            bet.amount(),
            bet.choice(),
            self.game_id,
            sender
        );
        let intent = build_place_bet(&self.target, self.game_id, bet);

        flight.advance(SubmissionStatus::AwaitingSignature);
        let receipt = match self.signer.sign_and_execute(&intent).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!("Bet was not submitted: {}", e);
                let err = match e {
                    BetGameError::SignatureDeclined | BetGameError::Submission(_) => e,
                    other => BetGameError::submission(other.to_string()),
                };
                return Err(self.surface(err));
            }
        };
        tracing::info!("Bet submitted in transaction {}", receipt.digest);

        flight.advance(SubmissionStatus::AwaitingConfirmation);
        let confirmation = self.confirmer.wait_for_transaction(&receipt.digest).await;

        flight.advance(SubmissionStatus::Refreshing);
        let refreshed = self.refresh_after_submit().await;
        drop(flight);

        match confirmation {
            Ok(execution) => {
                match &execution {
                    ExecutionStatus::Success => {
                        tracing::info!("Bet {} confirmed", receipt.digest)
                    }
                    ExecutionStatus::Failure { error } => {
                        tracing::warn!("Bet {} executed with failure: {}", receipt.digest, error)
                    }
                }
                Ok(BetReceipt {
                    digest: receipt.digest,
                    execution,
                    refreshed,
                })
            }
            Err(e) => {
                tracing::warn!("Could not confirm bet {}: {}", receipt.digest, e);
                Err(self.surface(BetGameError::ConfirmationUnknown {
                    digest: receipt.digest,
                    reason: e.to_string(),
                }))
            }
        }
    }

    async fn refresh_after_submit(&self) -> bool {
        match self.reader.read(&self.game_id).await {
            Ok(state) => {
                *self.display.write() = DisplayState::Ready(state);
                true
            }
            Err(e) => {
                tracing::warn!("Game state refresh after bet failed: {}", e);
                self.surface(e);
                false
            }
        }
    }

    fn try_claim(&self, next: SubmissionStatus) -> Result<InFlight<'_>> {
        let mut current = SubmissionStatus::Idle;
        let claimed = self.status.send_if_modified(|status| {
            current = *status;
            if *status == SubmissionStatus::Idle {
                *status = next;
                true
            } else {
                false
            }
        });

        if !claimed {
            return Err(BetGameError::Busy(current));
        }

        tracing::debug!("Bet status: {} -> {}", SubmissionStatus::Idle, next);
        Ok(InFlight {
            status: &self.status,
        })
    }

    fn surface(&self, err: BetGameError) -> BetGameError {
        *self.last_error.write() = Some(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TransactionIntent;
    use crate::chain::ObjectResponse;
    use crate::types::{SubmissionReceipt, SuiAddress};
    use crate::validator::MIN_BET_AMOUNT;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    const GAME: &str = "0xdd26212b40431a52ec4405f30813905fff326c4cb542e39b0411bbc9e7e1a9e1";
    const TARGET: &str =
        "0x94ba4b55545790295ba74bd4296a470ef0dfe6a49fcb29eef5eccb6b9cef661b::game::place_bet";
    const DIGEST: &str = "8Ej3mYb2xpQmVHzd5sGw";

    /// Records the controller status each fake observes when it is called.
    #[derive(Default)]
    struct Probe {
        rx: Mutex<Option<watch::Receiver<SubmissionStatus>>>,
        seen: Mutex<Vec<(&'static str, SubmissionStatus)>>,
    }

    impl Probe {
        fn record(&self, who: &'static str) {
            if let Some(rx) = self.rx.lock().as_ref() {
                let status = *rx.borrow();
                self.seen.lock().push((who, status));
            }
        }
    }

    fn game_response(total_bets: u64, carry_over: u64, active: bool) -> ObjectResponse {
        serde_json::from_value(json!({
            "data": {
                "objectId": GAME,
                "version": "9",
                "digest": "5Hn3QkVz",
                "owner": { "Shared": { "initial_shared_version": 1 } },
                "content": {
                    "dataType": "moveObject",
                    "fields": {
                        "active": active,
                        "total_bets": total_bets.to_string(),
                        "carry_over": carry_over.to_string()
                    }
                }
            }
        }))
        .unwrap()
    }

    fn missing_response() -> ObjectResponse {
        serde_json::from_value(json!({ "error": { "code": "notExists", "object_id": GAME } }))
            .unwrap()
    }

    struct FakeObjects {
        responses: Mutex<VecDeque<Result<ObjectResponse>>>,
        calls: AtomicUsize,
        probe: Arc<Probe>,
    }

    #[async_trait]
    impl ObjectSource for FakeObjects {
        async fn get_object(&self, _id: &ObjectId) -> Result<ObjectResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.probe.record("read");
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(BetGameError::rpc("no scripted response")))
        }
    }

    /// Yields once per lookup, like a wallet round-trip.
    struct FakeAccount {
        address: Option<SuiAddress>,
        calls: AtomicUsize,
        probe: Arc<Probe>,
    }

    #[async_trait]
    impl AccountProvider for FakeAccount {
        async fn current_account(&self) -> Option<SuiAddress> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.probe.record("account");
            tokio::task::yield_now().await;
            self.address
        }
    }

    enum SignMode {
        Accept,
        Decline,
        Fail,
    }

    struct FakeSigner {
        mode: SignMode,
        gate: Mutex<Option<oneshot::Receiver<()>>>,
        calls: AtomicUsize,
        last_intent: Mutex<Option<TransactionIntent>>,
        probe: Arc<Probe>,
    }

    #[async_trait]
    impl TransactionSigner for FakeSigner {
        async fn sign_and_execute(&self, intent: &TransactionIntent) -> Result<SubmissionReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.probe.record("sign");
            *self.last_intent.lock() = Some(intent.clone());

            let gate = self.gate.lock().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }

            match self.mode {
                SignMode::Accept => Ok(SubmissionReceipt {
                    digest: DIGEST.parse().unwrap(),
                }),
                SignMode::Decline => Err(BetGameError::SignatureDeclined),
                SignMode::Fail => Err(BetGameError::rpc("dry run failed: InsufficientGas")),
            }
        }
    }

    struct FakeConfirmer {
        result: Mutex<Option<Result<ExecutionStatus>>>,
        calls: AtomicUsize,
        probe: Arc<Probe>,
    }

    #[async_trait]
    impl ConfirmationWaiter for FakeConfirmer {
        async fn wait_for_transaction(&self, digest: &TransactionDigest) -> Result<ExecutionStatus> {
            assert_eq!(digest.as_str(), DIGEST);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.probe.record("confirm");
            self.result
                .lock()
                .take()
                .unwrap_or(Ok(ExecutionStatus::Success))
        }
    }

    struct Harness {
        controller: BetController,
        objects: Arc<FakeObjects>,
        account: Arc<FakeAccount>,
        signer: Arc<FakeSigner>,
        confirmer: Arc<FakeConfirmer>,
        probe: Arc<Probe>,
    }

    impl Harness {
        fn new(
            reads: Vec<Result<ObjectResponse>>,
            mode: SignMode,
            confirmation: Result<ExecutionStatus>,
        ) -> Self {
            Self::build(reads, mode, confirmation, Some("0xa11ce".parse().unwrap()), None)
        }

        fn build(
            reads: Vec<Result<ObjectResponse>>,
            mode: SignMode,
            confirmation: Result<ExecutionStatus>,
            account: Option<SuiAddress>,
            gate: Option<oneshot::Receiver<()>>,
        ) -> Self {
            let probe = Arc::new(Probe::default());
            let objects = Arc::new(FakeObjects {
                responses: Mutex::new(reads.into_iter().collect()),
                calls: AtomicUsize::new(0),
                probe: probe.clone(),
            });
            let signer = Arc::new(FakeSigner {
                mode,
                gate: Mutex::new(gate),
                calls: AtomicUsize::new(0),
                last_intent: Mutex::new(None),
                probe: probe.clone(),
            });
            let account = Arc::new(FakeAccount {
                address: account,
                calls: AtomicUsize::new(0),
                probe: probe.clone(),
            });
            let confirmer = Arc::new(FakeConfirmer {
                result: Mutex::new(Some(confirmation)),
                calls: AtomicUsize::new(0),
                probe: probe.clone(),
            });

            let controller = BetController::new(
                GAME.parse().unwrap(),
                TARGET.parse().unwrap(),
                Facilities {
                    objects: objects.clone(),
                    account: account.clone(),
                    signer: signer.clone(),
                    confirmer: confirmer.clone(),
                },
            );
            *probe.rx.lock() = Some(controller.subscribe_status());

            Self {
                controller,
                objects,
                account,
                signer,
                confirmer,
                probe,
            }
        }

        fn reads(&self) -> usize {
            self.objects.calls.load(Ordering::SeqCst)
        }

        fn account_lookups(&self) -> usize {
            self.account.calls.load(Ordering::SeqCst)
        }

        fn signs(&self) -> usize {
            self.signer.calls.load(Ordering::SeqCst)
        }

        fn confirms(&self) -> usize {
            self.confirmer.calls.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn test_amount_below_minimum_stays_local() {
        let h = Harness::new(vec![], SignMode::Accept, Ok(ExecutionStatus::Success));

        let err = h.controller.submit(500_000_000, 3).await.unwrap_err();
        assert!(matches!(err, BetGameError::Validation(_)));
        assert!(err.to_string().contains("amount below minimum"));
        assert!(err.is_local());

        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
        assert_eq!((h.reads(), h.signs(), h.confirms()), (0, 0, 0));
        assert_eq!(h.controller.display_state(), DisplayState::Loading);
        assert_eq!(
            h.controller.last_error().as_deref(),
            Some("Invalid bet: amount below minimum")
        );
    }

    #[tokio::test]
    async fn test_choice_out_of_range_stays_local() {
        let h = Harness::new(vec![], SignMode::Accept, Ok(ExecutionStatus::Success));

        for choice in [0, 11, -3] {
            let err = h.controller.submit(1_000_000_000, choice).await.unwrap_err();
            assert!(err.to_string().contains("choice out of range"));
        }

        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
        assert_eq!((h.reads(), h.signs(), h.confirms()), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_confirmed_bet_refreshes_once() {
        let h = Harness::new(
            vec![
                Ok(game_response(10_000_000_000, 0, true)),
                Ok(game_response(12_000_000_000, 0, true)),
            ],
            SignMode::Accept,
            Ok(ExecutionStatus::Success),
        );

        let before = h.controller.refresh().await.unwrap();
        assert_eq!(before.total_bets, 10_000_000_000);

        let receipt = h.controller.submit(2_000_000_000, 7).await.unwrap();
        assert_eq!(receipt.digest.as_str(), DIGEST);
        assert_eq!(receipt.execution, ExecutionStatus::Success);
        assert!(receipt.refreshed);

        assert_eq!(h.reads(), 2);
        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
        assert!(h.controller.last_error().is_none());

        let shown = h.controller.display_state();
        let game = shown.game().unwrap();
        assert!(game.active);
        assert_eq!(game.total_bets, 12_000_000_000);
        assert_eq!(game.carry_over, 0);

        let intent = h.signer.last_intent.lock().clone().unwrap();
        assert_eq!(intent.bet_amount(), Some(2_000_000_000));
        assert_eq!(intent.bet_choice(), Some(7));
        assert_eq!(intent.game_object(), Some(GAME.parse().unwrap()));
    }

    #[tokio::test]
    async fn test_lifecycle_order() {
        let h = Harness::new(
            vec![Ok(game_response(1, 0, true))],
            SignMode::Accept,
            Ok(ExecutionStatus::Success),
        );

        h.controller.submit(MIN_BET_AMOUNT, 1).await.unwrap();

        assert_eq!(
            *h.probe.seen.lock(),
            vec![
                ("account", SubmissionStatus::Building),
                ("sign", SubmissionStatus::AwaitingSignature),
                ("confirm", SubmissionStatus::AwaitingConfirmation),
                ("read", SubmissionStatus::Refreshing),
            ]
        );
        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_declined_signature_keeps_state() {
        let h = Harness::new(
            vec![Ok(game_response(10_000_000_000, 5, true))],
            SignMode::Decline,
            Ok(ExecutionStatus::Success),
        );

        h.controller.refresh().await.unwrap();
        let before = h.controller.display_state();

        let err = h.controller.submit(2_000_000_000, 4).await.unwrap_err();
        assert!(matches!(err, BetGameError::SignatureDeclined));

        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
        assert_eq!(h.controller.display_state(), before);
        assert_eq!(h.reads(), 1);
        assert_eq!(h.confirms(), 0);
        assert!(h.controller.last_error().is_some());
    }

    #[tokio::test]
    async fn test_signer_failure_maps_to_submission_error() {
        let h = Harness::new(vec![], SignMode::Fail, Ok(ExecutionStatus::Success));

        let err = h.controller.submit(MIN_BET_AMOUNT, 2).await.unwrap_err();
        assert!(matches!(err, BetGameError::Submission(ref msg) if msg.contains("InsufficientGas")));
        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
        assert_eq!((h.reads(), h.confirms()), (0, 0));
    }

    #[tokio::test]
    async fn test_second_submit_is_rejected_while_in_flight() {
        let (release, gate) = oneshot::channel();
        let h = Harness::build(
            vec![Ok(game_response(3_000_000_000, 0, true))],
            SignMode::Accept,
            Ok(ExecutionStatus::Success),
            Some("0xa11ce".parse().unwrap()),
            Some(gate),
        );

        let first = h.controller.submit(2_000_000_000, 7);
        let second = async {
            while h.controller.status() != SubmissionStatus::AwaitingSignature {
                tokio::task::yield_now().await;
            }
            let result = h.controller.submit(1_000_000_000, 2).await;
            let _ = release.send(());
            result
        };

        let (first, second) = tokio::join!(first, second);

        assert!(first.is_ok());
        assert!(matches!(
            second,
            Err(BetGameError::Busy(SubmissionStatus::AwaitingSignature))
        ));
        assert_eq!(h.signs(), 1);
        assert_eq!(h.reads(), 1);
        assert!(h.controller.last_error().is_none());
        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_immediate_double_submit_places_one_bet() {
        let h = Harness::new(
            vec![Ok(game_response(3_000_000_000, 0, true))],
            SignMode::Accept,
            Ok(ExecutionStatus::Success),
        );

        let (first, second) = tokio::join!(
            h.controller.submit(MIN_BET_AMOUNT, 1),
            h.controller.submit(MIN_BET_AMOUNT, 2)
        );

        assert!(first.is_ok());
        assert!(matches!(
            second,
            Err(BetGameError::Busy(SubmissionStatus::Building))
        ));
        assert_eq!(h.account_lookups(), 1);
        assert_eq!(h.signs(), 1);
        assert_eq!(h.reads(), 1);
        assert_eq!(h.controller.status(), SubmissionStatus::Idle);

        let seen = h.probe.seen.lock().clone();
        assert_eq!(seen[0], ("account", SubmissionStatus::Building));
    }

    #[tokio::test]
    async fn test_confirmation_failure_is_ambiguous_and_still_refreshes() {
        let h = Harness::new(
            vec![Ok(game_response(4_000_000_000, 0, true))],
            SignMode::Accept,
            Err(BetGameError::rpc("Timed out after 60s")),
        );

        let err = h.controller.submit(MIN_BET_AMOUNT, 9).await.unwrap_err();
        match &err {
            BetGameError::ConfirmationUnknown { digest, reason } => {
                assert_eq!(digest.as_str(), DIGEST);
                assert!(reason.contains("Timed out"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("please verify"));

        assert_eq!(h.reads(), 1);
        assert_eq!(
            h.controller.display_state().game().map(|g| g.total_bets),
            Some(4_000_000_000)
        );
        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_failed_refresh_does_not_fail_the_bet() {
        let h = Harness::new(
            vec![
                Ok(game_response(1_000_000_000, 0, true)),
                Err(BetGameError::rpc("connection reset")),
            ],
            SignMode::Accept,
            Ok(ExecutionStatus::Success),
        );

        h.controller.refresh().await.unwrap();
        let before = h.controller.display_state();

        let receipt = h.controller.submit(MIN_BET_AMOUNT, 5).await.unwrap();
        assert!(!receipt.refreshed);
        assert_eq!(h.controller.display_state(), before);
        assert!(h
            .controller
            .last_error()
            .unwrap()
            .contains("connection reset"));
        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_onchain_failure_is_reported() {
        let h = Harness::new(
            vec![Ok(game_response(0, 0, false))],
            SignMode::Accept,
            Ok(ExecutionStatus::Failure {
                error: "MoveAbort(game, 1)".to_string(),
            }),
        );

        let receipt = h.controller.submit(MIN_BET_AMOUNT, 5).await.unwrap();
        assert!(!receipt.execution.is_success());
        assert!(receipt.refreshed);
    }

    #[tokio::test]
    async fn test_submit_requires_account() {
        let h = Harness::build(
            vec![],
            SignMode::Accept,
            Ok(ExecutionStatus::Success),
            None,
            None,
        );

        let err = h.controller.submit(MIN_BET_AMOUNT, 1).await.unwrap_err();
        assert!(matches!(err, BetGameError::NoAccount));
        assert_eq!(h.signs(), 0);
        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_refresh_reports_missing_game() {
        let h = Harness::new(
            vec![Ok(missing_response())],
            SignMode::Accept,
            Ok(ExecutionStatus::Success),
        );

        let err = h.controller.refresh().await.unwrap_err();
        assert!(matches!(err, BetGameError::GameNotFound { .. }));
        assert_eq!(
            h.controller.display_state(),
            DisplayState::NotFound(GAME.parse().unwrap())
        );
        assert_eq!(h.controller.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_refresh_error_is_displayed_and_retryable() {
        let h = Harness::new(
            vec![
                Err(BetGameError::rpc("503 Service Unavailable")),
                Ok(game_response(7, 1, true)),
            ],
            SignMode::Accept,
            Ok(ExecutionStatus::Success),
        );

        assert!(h.controller.refresh().await.is_err());
        assert!(matches!(h.controller.display_state(), DisplayState::Error(_)));

        let state = h.controller.refresh().await.unwrap();
        assert_eq!(state.total_bets, 7);
        assert_eq!(h.controller.display_state(), DisplayState::Ready(state));
    }
}
