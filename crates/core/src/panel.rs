//! The conversion panel: token selection, amount entry and the
//! approve-then-migrate workflow.
use std::time::Instant;

use alloy::primitives::{Address, TxHash, U256};
use color_eyre::eyre::{self, eyre};
use futures::future::join;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    action::{self, Action, Decision, MigrateMethod},
    amount::{AmountInput, Balance, fixed_value},
    clipboard::Clipboard,
    ledger::{ChainReader, ChainWriter, TxOutcome},
    toast::{ToastChannel, ToastDurations, Toasts},
    token::{TargetToken, TokenDescriptor, TokenList},
    view::{ButtonView, HeaderView, PanelView},
    wallet::WalletConnector,
};

/// State of an on-chain read. `Unavailable` renders as a loading marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadState<T> {
    Unavailable,
    Ready(T),
}

impl<T> ReadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ReadState::Ready(value) => Some(value),
            ReadState::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PanelSettings {
    pub tokens: TokenList,
    pub migration_contract: Address,
    pub target: TargetToken,
    pub toasts: ToastDurations,
}

/// What pressing the submit button did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The button was disabled
    Skipped,
    Connected(Address),
    Submitted { action: Action, hash: TxHash },
    Failed { action: Action },
}

pub struct ConversionPanel<W, L> {
    wallet: W,
    ledger: L,
    settings: PanelSettings,

    selected: Address,
    dropdown_open: bool,
    input: AmountInput,
    balance: ReadState<Balance>,
    allowance: ReadState<U256>,

    in_flight: bool,
    last_tx: Option<TxHash>,
    toasts: Toasts,
}

impl<W, L> ConversionPanel<W, L>
where
    W: WalletConnector,
    L: ChainReader + ChainWriter,
{
    pub fn new(wallet: W, ledger: L, settings: PanelSettings) -> Self {
        let selected = settings.tokens.first().address;
        let toasts = Toasts::new(settings.toasts);

        Self {
            wallet,
            ledger,
            settings,
            selected,
            dropdown_open: false,
            input: AmountInput::default(),
            balance: ReadState::Unavailable,
            allowance: ReadState::Unavailable,
            in_flight: false,
            last_tx: None,
            toasts,
        }
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn tokens(&self) -> &TokenList {
        &self.settings.tokens
    }

    /// The selected token, or the first listed token if the selection is not listed.
    pub fn active_token(&self) -> &TokenDescriptor {
        self.settings.tokens.resolve(self.selected)
    }

    pub fn input(&self) -> &AmountInput {
        &self.input
    }

    pub fn balance(&self) -> &ReadState<Balance> {
        &self.balance
    }

    pub fn allowance(&self) -> &ReadState<U256> {
        &self.allowance
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn last_tx(&self) -> Option<TxHash> {
        self.last_tx
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    /// Selects a token and closes the dropdown. The amount field is kept.
    pub fn select_token(&mut self, address: Address) {
        if self.selected != address {
            self.balance = ReadState::Unavailable;
            self.allowance = ReadState::Unavailable;
        }
        self.selected = address;
        self.dropdown_open = false;

        debug!(token.symbol = %self.active_token().symbol, "token selected");
    }

    pub fn select_symbol(&mut self, symbol: &str) -> eyre::Result<()> {
        let address = self
            .settings
            .tokens
            .by_symbol(symbol)
            .map(|token| token.address)
            .ok_or_else(|| eyre!("unknown token `{symbol}`"))?;
        self.select_token(address);
        Ok(())
    }

    /// Selects by zero-based list position.
    pub fn select_index(&mut self, index: usize) -> eyre::Result<()> {
        let address = self
            .settings
            .tokens
            .get(index)
            .map(|token| token.address)
            .ok_or_else(|| eyre!("no token at position {}", index + 1))?;
        self.select_token(address);
        Ok(())
    }

    pub fn set_amount(&mut self, text: &str) {
        self.input = AmountInput::parse(text, self.active_token().decimals);
    }

    /// Copies the fetched balance into the amount field. Returns `false` if no
    /// balance has been fetched yet.
    pub fn set_max(&mut self) -> bool {
        match &self.balance {
            ReadState::Ready(balance) => {
                self.input = AmountInput::from_balance(balance);
                true
            }
            ReadState::Unavailable => false,
        }
    }

    /// Re-fetches balance and allowance of the active token for the connected account.
    #[instrument(skip(self), fields(token.symbol = %self.active_token().symbol))]
    pub async fn refresh(&mut self) {
        let Some(owner) = self.wallet.address() else {
            self.balance = ReadState::Unavailable;
            self.allowance = ReadState::Unavailable;
            return;
        };
        let token = self.active_token().clone();
        let spender = self.settings.migration_contract;

        let (balance, allowance) = join(
            self.ledger.balance_of(token.address, owner),
            self.ledger.allowance(token.address, owner, spender),
        )
        .await;

        self.balance = match balance.and_then(|value| Balance::new(value, token.decimals)) {
            Ok(balance) => ReadState::Ready(balance),
            Err(e) => {
                warn!(error = %e, "balance unavailable");
                ReadState::Unavailable
            }
        };
        self.allowance = match allowance {
            Ok(allowance) => ReadState::Ready(allowance),
            Err(e) => {
                warn!(error = %e, "allowance unavailable");
                ReadState::Unavailable
            }
        };
    }

    /// An allowance that has not been fetched counts as zero.
    pub fn decision(&self) -> Decision {
        let approved = self.allowance.ready().copied().unwrap_or_default();
        action::decide(
            self.wallet.is_connected(),
            self.input.raw(),
            approved,
            self.in_flight,
        )
    }

    /// Presses the submit button.
    ///
    /// Submission failures of any kind are logged and shown as the error toast;
    /// a broadcast transaction shows the pending toast. Confirmation is reported
    /// separately through [`ConversionPanel::on_receipt`].
    pub async fn submit(&mut self) -> Submission {
        let Decision { action, disabled } = self.decision();
        if disabled {
            debug!(%action, "submit ignored, button disabled");
            return Submission::Skipped;
        }

        if action == Action::Connect {
            return match self.connect() {
                Ok(address) => {
                    self.refresh().await;
                    Submission::Connected(address)
                }
                Err(e) => {
                    warn!(error = %e, "wallet connection failed");
                    Submission::Failed { action }
                }
            };
        }

        let token = self.active_token().clone();
        let amount = self.input.raw();
        let contract = self.settings.migration_contract;

        self.in_flight = true;
        let result = if action == Action::Approve {
            let approval = action::approval_amount(amount);
            info!(token.symbol = %token.symbol, %approval, spender = %contract, "submitting approve");
            self.ledger.approve(token.address, contract, approval).await
        } else {
            let method = MigrateMethod::for_token(&self.settings.tokens, token.address);
            info!(token.symbol = %token.symbol, %amount, %method, "submitting migration");
            self.ledger.migrate(contract, method, amount).await
        };
        self.in_flight = false;

        match result {
            Ok(hash) => {
                info!(%action, tx.hash = %hash, "transaction submitted");
                self.last_tx = Some(hash);
                self.toasts.trigger(ToastChannel::Pending, Instant::now());
                Submission::Submitted { action, hash }
            }
            Err(e) => {
                error!(%action, error = ?e, "transaction submission failed");
                self.toasts.trigger(ToastChannel::Error, Instant::now());
                Submission::Failed { action }
            }
        }
    }

    pub async fn wait_for_receipt(&self, hash: TxHash) -> eyre::Result<TxOutcome> {
        self.ledger.wait_for_receipt(hash).await
    }

    /// Handles the mined result of a submitted transaction.
    pub async fn on_receipt(&mut self, hash: TxHash, outcome: eyre::Result<TxOutcome>) {
        match outcome {
            Ok(TxOutcome::Confirmed) => {
                info!(tx.hash = %hash, "transaction confirmed");
                self.refresh().await;
                self.toasts.trigger(ToastChannel::Success, Instant::now());
            }
            Ok(TxOutcome::Reverted) => {
                error!(tx.hash = %hash, "transaction reverted");
                self.toasts.trigger(ToastChannel::Error, Instant::now());
            }
            Err(e) => {
                error!(tx.hash = %hash, error = ?e, "waiting for receipt failed");
                self.toasts.trigger(ToastChannel::Error, Instant::now());
            }
        }
    }

    pub fn connect(&mut self) -> eyre::Result<Address> {
        self.wallet.open_connect_modal()
    }

    pub fn disconnect(&mut self) {
        self.wallet.disconnect();
        self.balance = ReadState::Unavailable;
        self.allowance = ReadState::Unavailable;
    }

    /// Copies the target token address, lowercase hex, and shows the copy toast.
    pub fn copy_target_address<C: Clipboard>(&mut self, clipboard: &mut C) -> eyre::Result<()> {
        let address = self.settings.target.address.to_string().to_lowercase();
        clipboard.write_text(&address)?;
        self.toasts.trigger(ToastChannel::Copy, Instant::now());
        Ok(())
    }

    /// Advances the toast timers. Returns the toasts hidden by this tick.
    pub fn tick(&mut self, now: Instant) -> Vec<ToastChannel> {
        self.toasts.tick(now)
    }

    pub fn view(&self) -> PanelView {
        let connected = self.wallet.is_connected();
        let decision = self.decision();
        let target = &self.settings.target;

        let available = if connected {
            self.balance
                .ready()
                .map(|balance| fixed_value(&balance.formatted))
        } else {
            Some("0".to_string())
        };

        PanelView {
            header: HeaderView {
                title: format!("{} ({})", target.name, target.symbol),
                account: self.wallet.open_account_modal(),
                chain: self.wallet.open_chain_modal(),
            },
            token_label: self.active_token().label(),
            dropdown: self
                .dropdown_open
                .then(|| self.settings.tokens.iter().map(|t| t.label()).collect()),
            amount: self.input.display().to_string(),
            available,
            button: ButtonView {
                label: decision.action.label(),
                disabled: decision.disabled,
                busy: self.in_flight,
            },
            loading: connected && self.allowance.ready().is_none(),
            target_symbol: target.symbol.clone(),
            target_address: target.address,
            toasts: self.toasts.visible().map(ToastChannel::message).collect(),
            pending_tx_url: self.pending_tx_url(),
        }
    }

    /// Explorer link shown with the pending toast.
    fn pending_tx_url(&self) -> Option<String> {
        if !self.toasts.is_visible(ToastChannel::Pending) {
            return None;
        }
        let hash = self.last_tx?;
        self.wallet.chain()?.explorer_tx_url(&hash)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, LazyLock, Mutex},
        time::Duration,
    };

    use alloy::primitives::address;

    use super::*;
    use crate::{
        chain::{Chain, Network},
        clipboard::MockClipboard,
    };
    use proptest::prelude::*;

    pub(crate) const OWNER: Address = address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    pub(crate) const MIGRATION: Address = address!("0xcccccccccccccccccccccccccccccccccccccccc");

    static BSC: LazyLock<Chain> = LazyLock::new(Chain::bsc_mainnet);

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Call {
        BalanceOf(Address),
        Allowance(Address, Address),
        Approve(Address, Address, U256),
        Migrate(MigrateMethod, U256),
    }

    /// In-memory ledger recording every call.
    #[derive(Clone, Default)]
    pub(crate) struct FakeLedger {
        pub(crate) calls: Arc<Mutex<Vec<Call>>>,
        pub(crate) balances: Arc<Mutex<HashMap<Address, U256>>>,
        pub(crate) allowances: Arc<Mutex<HashMap<Address, U256>>>,
        pub(crate) reject_writes: bool,
    }

    impl FakeLedger {
        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls().iter().filter(|c| pred(c)).count()
        }
    }

    impl ChainReader for FakeLedger {
        async fn balance_of(&self, token: Address, _owner: Address) -> eyre::Result<U256> {
            self.record(Call::BalanceOf(token));
            Ok(self
                .balances
                .lock()
                .unwrap()
                .get(&token)
                .copied()
                .unwrap_or_default())
        }

        async fn allowance(
            &self,
            token: Address,
            _owner: Address,
            spender: Address,
        ) -> eyre::Result<U256> {
            self.record(Call::Allowance(token, spender));
            Ok(self
                .allowances
                .lock()
                .unwrap()
                .get(&token)
                .copied()
                .unwrap_or_default())
        }
    }

    impl ChainWriter for FakeLedger {
        async fn approve(&self, token: Address, spender: Address, amount: U256) -> eyre::Result<TxHash> {
            self.record(Call::Approve(token, spender, amount));
            if self.reject_writes {
                return Err(eyre!("user rejected the request"));
            }
            self.allowances.lock().unwrap().insert(token, amount);
            Ok(TxHash::repeat_byte(1))
        }

        async fn migrate(
            &self,
            _contract: Address,
            method: MigrateMethod,
            amount: U256,
        ) -> eyre::Result<TxHash> {
            self.record(Call::Migrate(method, amount));
            if self.reject_writes {
                return Err(eyre!("execution reverted"));
            }
            Ok(TxHash::repeat_byte(2))
        }

        async fn wait_for_receipt(&self, _hash: TxHash) -> eyre::Result<TxOutcome> {
            Ok(TxOutcome::Confirmed)
        }
    }

    pub(crate) struct FakeWallet {
        pub(crate) connected: bool,
        pub(crate) can_connect: bool,
    }

    impl WalletConnector for FakeWallet {
        fn address(&self) -> Option<Address> {
            self.connected.then_some(OWNER)
        }

        fn chain(&self) -> Option<&Chain> {
            self.connected.then(|| &*BSC)
        }

        fn open_connect_modal(&mut self) -> eyre::Result<Address> {
            if !self.can_connect {
                return Err(eyre!("no wallet"));
            }
            self.connected = true;
            Ok(OWNER)
        }

        fn disconnect(&mut self) {
            self.connected = false;
        }
    }

    pub(crate) fn settings() -> PanelSettings {
        PanelSettings {
            tokens: TokenList::for_network(Network::Bsc),
            migration_contract: MIGRATION,
            target: TargetToken::default(),
            toasts: ToastDurations::default(),
        }
    }

    pub(crate) fn connected_panel(ledger: FakeLedger) -> ConversionPanel<FakeWallet, FakeLedger> {
        let wallet = FakeWallet {
            connected: true,
            can_connect: true,
        };
        ConversionPanel::new(wallet, ledger, settings())
    }

    fn tokens(n: u128) -> U256 {
        U256::from(n) * U256::from(10u128.pow(18))
    }

    fn is_read(call: &Call) -> bool {
        matches!(call, Call::BalanceOf(_) | Call::Allowance(..))
    }

    #[tokio::test]
    async fn test_reads_follow_selected_token() {
        let ledger = FakeLedger::default();
        let mut panel = connected_panel(ledger.clone());

        for token in settings().tokens.iter() {
            panel.select_token(token.address);
            panel.refresh().await;

            let calls = ledger.calls();
            let last_two = &calls[calls.len() - 2..];
            assert!(last_two.contains(&Call::BalanceOf(token.address)));
            assert!(last_two.contains(&Call::Allowance(token.address, MIGRATION)));
        }
    }

    #[tokio::test]
    async fn test_unknown_selection_falls_back_to_first_token() {
        let ledger = FakeLedger::default();
        let mut panel = connected_panel(ledger.clone());

        panel.select_token(Address::repeat_byte(0x99));
        assert_eq!(panel.active_token(), settings().tokens.first());

        panel.refresh().await;
        assert!(ledger
            .calls()
            .contains(&Call::BalanceOf(settings().tokens.first().address)));
    }

    #[tokio::test]
    async fn test_selection_closes_dropdown_and_keeps_amount() {
        let mut panel = connected_panel(FakeLedger::default());
        panel.set_amount("12.5");
        panel.toggle_dropdown();
        assert!(panel.view().dropdown.is_some());

        panel.select_symbol("fth").unwrap();
        assert!(!panel.is_dropdown_open());
        assert_eq!(panel.input().display(), "12.5");
        assert_eq!(panel.active_token().symbol, "FTH");

        assert!(panel.select_symbol("DOGE").is_err());
        assert_eq!(panel.active_token().symbol, "FTH");
    }

    #[tokio::test]
    async fn test_max_copies_balance_exactly() {
        let ledger = FakeLedger::default();
        let jedals = settings().tokens.first().address;
        let raw = U256::from(1_234_567_891_234_567_891_234u128);
        ledger.balances.lock().unwrap().insert(jedals, raw);

        let mut panel = connected_panel(ledger);
        assert!(!panel.set_max(), "nothing fetched yet");

        panel.refresh().await;
        assert!(panel.set_max());
        assert_eq!(panel.input().raw(), raw);
        assert_eq!(panel.input().display(), "1234.567891234567891234");
        assert_eq!(panel.view().available.as_deref(), Some("1,234.5678"));
    }

    #[tokio::test]
    async fn test_approve_then_migrate_sequence() {
        let ledger = FakeLedger::default();
        let mut panel = connected_panel(ledger.clone());
        panel.refresh().await;
        panel.set_amount("5");

        assert_eq!(panel.decision().action, Action::Approve);
        let submission = panel.submit().await;
        let Submission::Submitted { action, hash } = submission else {
            panic!("unexpected {submission:?}");
        };
        assert_eq!(action, Action::Approve);
        assert!(panel.toasts().is_visible(ToastChannel::Pending));

        let outcome = panel.wait_for_receipt(hash).await;
        panel.on_receipt(hash, outcome).await;
        assert_eq!(panel.decision().action, Action::Migrate);
        assert_eq!(panel.view().button.label, "Convert");

        let submission = panel.submit().await;
        assert!(matches!(
            submission,
            Submission::Submitted {
                action: Action::Migrate,
                ..
            }
        ));
        assert!(ledger
            .calls()
            .contains(&Call::Migrate(MigrateMethod::MigrateA, tokens(5))));
        assert!(ledger.calls().contains(&Call::Approve(
            settings().tokens.first().address,
            MIGRATION,
            tokens(5)
        )));
    }

    #[tokio::test]
    async fn test_second_token_migrates_through_b() {
        let ledger = FakeLedger::default();
        let fth = settings().tokens.get(1).unwrap().address;
        ledger.allowances.lock().unwrap().insert(fth, tokens(100));

        let mut panel = connected_panel(ledger.clone());
        panel.select_token(fth);
        panel.refresh().await;
        panel.set_amount("3");

        panel.submit().await;
        assert_eq!(
            ledger.calls().last(),
            Some(&Call::Migrate(MigrateMethod::MigrateB, tokens(3)))
        );
    }

    #[tokio::test]
    async fn test_pending_notice_links_the_explorer() {
        let mut panel = connected_panel(FakeLedger::default());
        panel.refresh().await;
        panel.set_amount("1");
        assert_eq!(panel.view().pending_tx_url, None);

        let Submission::Submitted { hash, .. } = panel.submit().await else {
            panic!("submission failed");
        };
        let url = panel.view().pending_tx_url.expect("explorer link while pending");
        assert!(url.ends_with(&format!("/tx/{hash}")), "{url}");
        assert!(panel.view().to_string().contains(&url));

        panel.tick(Instant::now() + Duration::from_secs(11));
        assert_eq!(panel.view().pending_tx_url, None);
    }

    #[tokio::test]
    async fn test_confirmation_refetches_once_and_shows_success() {
        let ledger = FakeLedger::default();
        let mut panel = connected_panel(ledger.clone());
        panel.refresh().await;
        panel.set_amount("1");

        let Submission::Submitted { hash, .. } = panel.submit().await else {
            panic!("submission failed");
        };
        let reads_before = ledger.count(is_read);
        assert!(!panel.toasts().is_visible(ToastChannel::Success));

        panel.on_receipt(hash, Ok(TxOutcome::Confirmed)).await;

        assert_eq!(ledger.count(is_read) - reads_before, 2);
        assert!(panel.toasts().is_visible(ToastChannel::Success));
        assert!(!panel.toasts().is_visible(ToastChannel::Error));
    }

    #[tokio::test]
    async fn test_failed_submission_shows_error_without_refetch() {
        let ledger = FakeLedger {
            reject_writes: true,
            ..Default::default()
        };
        let mut panel = connected_panel(ledger.clone());
        panel.refresh().await;
        panel.set_amount("1");
        let reads_before = ledger.count(is_read);

        let submission = panel.submit().await;

        assert_eq!(
            submission,
            Submission::Failed {
                action: Action::Approve
            }
        );
        assert_eq!(ledger.count(is_read), reads_before);
        assert!(panel.toasts().is_visible(ToastChannel::Error));
        assert!(!panel.toasts().is_visible(ToastChannel::Pending));
        assert!(!panel.toasts().is_visible(ToastChannel::Success));
        assert!(panel.last_tx().is_none());
    }

    #[tokio::test]
    async fn test_reverted_receipt_shows_error() {
        let ledger = FakeLedger::default();
        let mut panel = connected_panel(ledger.clone());
        let reads_before = ledger.count(is_read);

        panel
            .on_receipt(TxHash::repeat_byte(3), Ok(TxOutcome::Reverted))
            .await;

        assert!(panel.toasts().is_visible(ToastChannel::Error));
        assert!(!panel.toasts().is_visible(ToastChannel::Success));
        assert_eq!(ledger.count(is_read), reads_before);
    }

    #[tokio::test]
    async fn test_zero_amount_is_skipped() {
        let ledger = FakeLedger::default();
        let mut panel = connected_panel(ledger.clone());
        panel.refresh().await;

        assert!(panel.view().button.disabled);
        assert_eq!(panel.submit().await, Submission::Skipped);
        assert!(ledger
            .calls()
            .iter()
            .all(|c| !matches!(c, Call::Approve(..) | Call::Migrate(..))));
    }

    #[tokio::test]
    async fn test_disconnected_submit_connects() {
        let ledger = FakeLedger::default();
        let wallet = FakeWallet {
            connected: false,
            can_connect: true,
        };
        let mut panel = ConversionPanel::new(wallet, ledger.clone(), settings());

        let view = panel.view();
        assert_eq!(view.button.label, "Connect Wallet");
        assert!(!view.button.disabled);
        assert_eq!(view.available.as_deref(), Some("0"));

        assert_eq!(panel.submit().await, Submission::Connected(OWNER));
        assert!(panel.balance().ready().is_some());
        assert!(panel.toasts().visible().next().is_none());
    }

    #[tokio::test]
    async fn test_disconnect_clears_reads() {
        let mut panel = connected_panel(FakeLedger::default());
        panel.refresh().await;
        assert!(panel.allowance().ready().is_some());

        panel.disconnect();
        assert_eq!(panel.allowance(), &ReadState::Unavailable);
        assert_eq!(panel.decision().action, Action::Connect);
    }

    #[test]
    fn test_copy_writes_target_address() {
        let mut panel = connected_panel(FakeLedger::default());
        let expected = "0xd385764e63101856c182727520ecfd2bc0abaed9".to_string();

        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_write_text()
            .withf(move |text| *text == expected)
            .times(1)
            .returning(|_| Ok(()));

        panel.copy_target_address(&mut clipboard).unwrap();
        assert!(panel.toasts().is_visible(ToastChannel::Copy));

        let hidden = panel.tick(Instant::now() + Duration::from_secs(6));
        assert_eq!(hidden, vec![ToastChannel::Copy]);
    }

    #[test]
    fn test_failed_copy_shows_no_toast() {
        let mut panel = connected_panel(FakeLedger::default());
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_write_text()
            .returning(|_| Err(eyre!("no terminal")));

        assert!(panel.copy_target_address(&mut clipboard).is_err());
        assert!(!panel.toasts().is_visible(ToastChannel::Copy));
    }

    proptest! {
        #[test]
        fn test_submit_routes_by_allowance(requested in 1u64..1_000_000, approved in 0u64..1_000_000) {
            let ledger = FakeLedger::default();
            let jedals = settings().tokens.first().address;
            ledger.allowances.lock().unwrap().insert(jedals, U256::from(approved));

            let mut panel = connected_panel(ledger.clone());
            tokio_test::block_on(async {
                panel.refresh().await;
                panel.set_amount(&format!("0.{requested:018}"));
                panel.submit().await;
            });

            let last = ledger.calls().last().cloned();
            if requested > approved {
                prop_assert_eq!(last, Some(Call::Approve(jedals, MIGRATION, U256::from(requested))));
            } else {
                prop_assert_eq!(last, Some(Call::Migrate(MigrateMethod::MigrateA, U256::from(requested))));
            }
        }
    }
}
