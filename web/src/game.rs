use chrono::prelude::*;
use clap::Args;
use gattino_core as game;
use gloo::timers::callback::{Interval, Timeout};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::settings::Settings;
use crate::utils::*;

/// Milliseconds the die spins before it settles on a value.
const DICE_SPIN_MS: u32 = 1000;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

fn format_for_counter(num: i32) -> String {
    match num {
        ..0 => "000".to_string(),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

/// One play-through: the committed game state plus the bookkeeping worth
/// persisting alongside it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GameSession {
    pub engine: game::TurnEngine,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub roll_count: u32,
}

impl GameSession {
    fn new(engine: game::TurnEngine) -> Self {
        Self {
            engine,
            started_at: None,
            ended_at: None,
            roll_count: 0,
        }
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn on_roll(&mut self, now: DateTime<Utc>) {
        self.roll_count = self.roll_count.saturating_add(1);

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.engine.is_finished() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }

    fn restart(&mut self) {
        self.engine.reset();
        self.started_at = None;
        self.ended_at = None;
        self.roll_count = 0;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(game::TurnEngine::default())
    }
}

impl StorageKey for GameSession {
    const KEY: &'static str = "gattino:game:v1";
}

pub(crate) trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::RollOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::RollOutcome| outcome.has_update())
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    order: game::StepOrder,
    kind: game::CellKind,
    reward: String,
    position: game::Coord2,
    #[prop_or_default]
    current: bool,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        order,
        kind,
        reward,
        position,
        current,
    } = props.clone();

    let mut class = classes!("cell", kind.as_str());
    if current {
        class.push("current");
    }

    if !kind.is_path() {
        return html! { <td {class}/> };
    }

    html! {
        <td {class}
            data-order={order.to_string()}
            data-position={format!("{},{}", position.0, position.1)}
        >
            <span class="order">{order}</span>
            <span class="reward">{reward}</span>
            if current {
                <span class="token">{"🐱"}</span>
            }
        </td>
    }
}

fn die_face(value: Option<game::Steps>) -> &'static str {
    match value {
        Some(1) => "⚀",
        Some(2) => "⚁",
        Some(3) => "⚂",
        Some(4) => "⚃",
        Some(5) => "⚄",
        Some(6) => "⚅",
        _ => "🎲",
    }
}

#[derive(Properties, Clone, PartialEq)]
struct DiceProps {
    value: Option<game::Steps>,
    rolling: bool,
    disabled: bool,
    on_roll: Callback<()>,
}

#[function_component(DiceView)]
fn dice_component(props: &DiceProps) -> Html {
    let DiceProps {
        value,
        rolling,
        disabled,
        on_roll,
    } = props.clone();

    let face = if rolling { "🎲" } else { die_face(value) };
    let onclick = Callback::from(move |_: MouseEvent| on_roll.emit(()));

    html! {
        <div class={classes!("dice", rolling.then_some("rolling"))}>
            <span class="face" onclick={onclick.clone()}>{face}</span>
            <button {disabled} onclick={onclick}>
                { if rolling { "Rolling..." } else { "Roll the die" } }
            </button>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct RewardProps {
    reward: String,
    on_close: Callback<()>,
}

#[function_component(RewardPopup)]
fn reward_popup(props: &RewardProps) -> Html {
    let RewardProps { reward, on_close } = props.clone();
    let close = Callback::from(move |_: MouseEvent| on_close.emit(()));

    html! {
        <Modal>
            <div class="reward-overlay" onclick={close.clone()}>
                <article class="reward-box">
                    <h2>{"You found a reward!"}</h2>
                    <p class="prize">{reward}</p>
                    <button onclick={close}>{"Keep going"}</button>
                </article>
            </div>
        </Modal>
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    RollRequested,
    DiceSettled(game::Steps),
    WalkTick,
    RewardTimeout,
    DismissReward,
    Restart,
    ToggleSettings,
    UpdateSettings(Settings),
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a die seed instead of browser entropy
    #[arg(short, long)]
    pub seed: Option<String>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: Settings,
    session: GameSession,
    die: game::Die,
    dice_value: Option<game::Steps>,
    /// Where the token is drawn; trails the committed order while walking.
    shown_order: game::StepOrder,
    walk_target: game::StepOrder,
    reward_open: bool,
    settings_open: bool,
    dice_timeout: Option<Timeout>,
    walk_interval: Option<Interval>,
    reward_timeout: Option<Timeout>,
}

impl GameView {
    /// A roll is in flight until the die settles and the token stops walking.
    fn is_busy(&self) -> bool {
        self.dice_timeout.is_some() || self.walk_interval.is_some()
    }

    fn reward_timer(ctx: &Context<Self>, ms: u32) -> Timeout {
        let link = ctx.link().clone();
        Timeout::new(ms, move || link.send_message(Msg::RewardTimeout))
    }

    fn state_class(&self) -> Classes {
        use game::EngineState::*;

        classes!(match self.session.engine.state() {
            Idle => "not-started",
            Playing if self.is_busy() => "walking",
            Playing => "in-progress",
            Finished => "finished",
        })
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings: Settings = LocalOrDefault::local_or_default();
        let session: GameSession = LocalOrDefault::local_or_default();
        let seed = ctx
            .props()
            .seed
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(js_random_seed);

        let shown_order = session.engine.current_order();
        let reward_open = session.engine.pending_reward().is_some();
        let reward_timeout =
            reward_open.then(|| Self::reward_timer(ctx, settings.reward_timeout_ms));

        Self {
            settings,
            session,
            die: game::Die::from_seed(seed),
            dice_value: None,
            shown_order,
            walk_target: shown_order,
            reward_open,
            settings_open: false,
            dice_timeout: None,
            walk_interval: None,
            reward_timeout,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            RollRequested => {
                if self.is_busy() || self.session.engine.is_finished() {
                    false
                } else {
                    let steps = self.die.roll();
                    log::debug!("die rolled a {}", steps);
                    let link = ctx.link().clone();
                    self.dice_timeout = Some(Timeout::new(DICE_SPIN_MS, move || {
                        link.send_message(DiceSettled(steps))
                    }));
                    true
                }
            }
            DiceSettled(steps) => {
                self.dice_timeout = None;
                self.dice_value = Some(steps);

                if self.session.engine.roll(steps).has_update() {
                    self.session.on_roll(utc_now());
                    self.walk_target = self.session.engine.current_order();
                    let link = ctx.link().clone();
                    self.walk_interval =
                        Some(Interval::new(self.settings.walk_step_ms, move || {
                            link.send_message(WalkTick)
                        }));
                }
                true
            }
            WalkTick => {
                if self.shown_order < self.walk_target {
                    self.shown_order += 1;
                }
                if self.shown_order >= self.walk_target {
                    self.walk_interval = None;
                    if self.session.engine.pending_reward().is_some() {
                        self.reward_open = true;
                        self.reward_timeout =
                            Some(Self::reward_timer(ctx, self.settings.reward_timeout_ms));
                    }
                }
                true
            }
            DismissReward | RewardTimeout => {
                self.reward_timeout = None;
                let dismissed = self.session.engine.dismiss_reward().has_update();
                let was_open = core::mem::replace(&mut self.reward_open, false);
                dismissed || was_open
            }
            Restart => {
                self.dice_timeout = None;
                self.walk_interval = None;
                self.reward_timeout = None;
                self.session.restart();
                self.dice_value = None;
                self.shown_order = 0;
                self.walk_target = 0;
                self.reward_open = false;
                true
            }
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                true
            }
            UpdateSettings(settings) => {
                if self.settings != settings {
                    self.settings = settings;
                    self.settings.local_save();
                    true
                } else {
                    false
                }
            }
        };

        self.session.local_save();
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use crate::settings::SettingsView;
        use Msg::*;

        let engine = &self.session.engine;
        let layout = engine.layout();
        let (cols, rows) = layout.size();
        let finished = engine.is_finished();
        let busy = self.is_busy();
        let rolls = format_for_counter(self.session.roll_count as i32);
        let progress = format_for_counter(self.shown_order as i32);

        let cb_restart = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Restart
        });
        let cb_show_settings = ctx.link().callback(|_| ToggleSettings);

        html! {
            <div class="gattino">
                <small onclick={cb_show_settings}>{"···"}</small>
                <nav>
                    <aside title="rolls">{rolls}</aside>
                    <span><button class={self.state_class()} onclick={cb_restart.clone()}/></span>
                    <aside title="step">{progress}</aside>
                </nav>
                <table class={classes!("board", (!finished).then_some("playable"))}>
                {
                    for (0..rows).map(|y| html! {
                        <tr>
                        {
                            for (0..cols).map(|x| {
                                let cell = layout.cell_at((x, y));
                                let current = cell.order != 0 && cell.order == self.shown_order;
                                html! {
                                    <CellView
                                        order={cell.order}
                                        kind={cell.kind}
                                        reward={cell.reward.clone()}
                                        position={cell.position}
                                        {current}
                                    />
                                }
                            })
                        }
                        </tr>
                    })
                }
                </table>
                <DiceView
                    value={self.dice_value}
                    rolling={self.dice_timeout.is_some()}
                    disabled={finished || busy}
                    on_roll={ctx.link().callback(|_| RollRequested)}
                />
                if finished && !busy {
                    <section class="summary">
                        <p>{ format!(
                            "Course complete in {} rolls and {} seconds",
                            self.session.roll_count,
                            self.session.elapsed_secs(utc_now()),
                        ) }</p>
                        <button class="restart" onclick={cb_restart}>{"Play again"}</button>
                    </section>
                }
                if self.reward_open {
                    if let Some(reward) = engine.pending_reward() {
                        <RewardPopup
                            reward={reward.to_string()}
                            on_close={ctx.link().callback(|_| DismissReward)}
                        />
                    }
                }
                <SettingsView
                    open={self.settings_open}
                    settings={self.settings}
                    on_update={ctx.link().callback(UpdateSettings)}
                    on_close={ctx.link().callback(|_| ToggleSettings)}
                />
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn session_stamps_start_and_end_times() {
        let mut session = GameSession::default();
        assert_eq!(session.started_at, None);

        session.engine.roll(3).unwrap();
        session.on_roll(t(1_000));
        assert_eq!(session.started_at, Some(t(1_000)));
        assert_eq!(session.ended_at, None);
        assert_eq!(session.roll_count, 1);

        session.engine.roll(40).unwrap();
        session.on_roll(t(9_000));
        assert_eq!(session.started_at, Some(t(1_000)));
        assert_eq!(session.ended_at, Some(t(9_000)));
        assert_eq!(session.roll_count, 2);
    }

    #[test]
    fn elapsed_secs_freezes_at_the_recorded_end() {
        let mut session = GameSession::default();
        session.engine.roll(3).unwrap();
        session.on_roll(t(1_000));
        assert_eq!(session.elapsed_secs(t(5_500)), 4);

        session.engine.roll(40).unwrap();
        session.on_roll(t(9_000));
        assert_eq!(session.elapsed_secs(t(60_000)), 8);
    }

    #[test]
    fn restart_clears_the_session() {
        let mut session = GameSession::default();
        session.engine.roll(40).unwrap();
        session.on_roll(t(1_000));

        session.restart();
        assert_eq!(session.engine.current_order(), 0);
        assert_eq!(session.engine.state(), game::EngineState::Idle);
        assert_eq!(session.started_at, None);
        assert_eq!(session.ended_at, None);
        assert_eq!(session.roll_count, 0);
    }

    #[test]
    fn rejected_rolls_do_not_count_as_updates() {
        let mut session = GameSession::default();
        session.engine.roll(40).unwrap();

        assert!(!session.engine.roll(2).has_update());
    }

    #[test]
    fn session_survives_a_serde_round_trip() {
        let mut session = GameSession::default();
        session.engine.roll(8).unwrap();
        session.on_roll(t(1_000));

        let json = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, restored);
    }

    #[test]
    fn storage_key_is_versioned() {
        assert_eq!(<GameSession as StorageKey>::KEY, "gattino:game:v1");
    }

    #[test]
    fn counter_formatting_clamps_to_three_digits() {
        assert_eq!(format_for_counter(-5), "000");
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(35), "035");
        assert_eq!(format_for_counter(1_234), "999");
    }
}
