use capy_api::types::{game_reward, GameKind, WalletAccount};
use dioxus::prelude::*;

use crate::games::{
    puzzle_is_solved, shuffled_puzzle, spawn_targets, try_slide, ChaseState, GameState, Target,
    CHASE_SCORE, PUZZLE_BLANK, PUZZLE_SCORE, TARGET_SCORE,
};
use crate::hooks;
use crate::route::Route;
use crate::Session;

const COUNTDOWN_TICK_MS: u32 = 1_000;
const CHASE_TICK_MS: u32 = 100;

/// Every signal the arcade mutates, bundled so plain functions can drive
/// the games without fighting closure moves.
#[derive(Clone, Copy)]
struct ArcadeSignals {
    selected: Signal<Option<GameKind>>,
    game: Signal<GameState>,
    targets: Signal<Vec<Target>>,
    next_target_id: Signal<u32>,
    chase: Signal<ChaseState>,
    puzzle: Signal<Vec<u8>>,
    claiming: Signal<bool>,
    claimed: Signal<bool>,
    claim_error: Signal<Option<String>>,
    /// Bumped on every start/reset so stale timer loops notice and exit.
    run: Signal<u32>,
}

#[component]
pub fn Arcade() -> Element {
    let session = use_context::<Signal<Session>>();
    let nav = use_navigator();

    use_effect(move || {
        if !session.read().connected() {
            nav.push(Route::Welcome {});
        }
    });

    let signals = ArcadeSignals {
        selected: use_signal(|| None::<GameKind>),
        game: use_signal(GameState::default),
        targets: use_signal(Vec::new),
        next_target_id: use_signal(|| 0u32),
        chase: use_signal(ChaseState::default),
        puzzle: use_signal(Vec::new),
        claiming: use_signal(|| false),
        claimed: use_signal(|| false),
        claim_error: use_signal(|| None::<String>),
        run: use_signal(|| 0u32),
    };

    let account = session.read().account().cloned();

    let Some(account) = account else {
        return rsx! {
            div { class: "min-h-screen flex items-center justify-center p-8",
                div { class: "text-center",
                    h1 { class: "font-pixel text-4xl text-foreground mb-4", "\u{1F3AE} Arcade Games" }
                    p { class: "text-muted-foreground mb-8", "Please connect your wallet to play games" }
                }
            }
        };
    };

    let selected = signals.selected.read().clone();
    let game = signals.game.read().clone();

    rsx! {
        div { class: "min-h-screen bg-background p-8",
            div { class: "max-w-6xl mx-auto",
                div { class: "text-center mb-8",
                    h1 { class: "font-pixel text-4xl text-foreground mb-4", "\u{1F3AE} ARCADE GAMES" }
                    p { class: "text-muted-foreground", "Play games to earn points and make your pet happy!" }
                }

                if selected.is_none() {
                    GameSelection { signals }
                } else {
                    PlayArea { signals, account, game, kind: selected.unwrap_or(GameKind::Target) }
                }
            }
        }
    }
}

#[derive(Props, Clone)]
struct GameSelectionProps {
    signals: ArcadeSignals,
}

impl PartialEq for GameSelectionProps {
    fn eq(&self, _other: &Self) -> bool {
        // Signals are stable handles; re-render is driven by reads.
        true
    }
}

#[component]
fn GameSelection(props: GameSelectionProps) -> Element {
    let signals = props.signals;

    rsx! {
        div { class: "grid grid-cols-1 md:grid-cols-3 gap-6",
            GameCard {
                signals,
                kind: GameKind::Target,
                icon: "\u{1F3AF}",
                blurb: "Click on targets to score points!",
            }
            GameCard {
                signals,
                kind: GameKind::Chase,
                icon: "\u{1F3C3}",
                blurb: "Help the cat catch the mouse!",
            }
            GameCard {
                signals,
                kind: GameKind::Puzzle,
                icon: "\u{1F9E9}",
                blurb: "Arrange the numbers in order!",
            }
        }
    }
}

#[derive(Props, Clone)]
struct GameCardProps {
    signals: ArcadeSignals,
    kind: GameKind,
    icon: &'static str,
    blurb: &'static str,
}

impl PartialEq for GameCardProps {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[component]
fn GameCard(props: GameCardProps) -> Element {
    let signals = props.signals;
    let kind = props.kind;
    let icon = props.icon;
    let blurb = props.blurb;
    let title = kind.title();

    rsx! {
        div {
            class: "retro-panel p-6 text-center hover:shadow-lg transition-shadow cursor-pointer group",
            onclick: move |_| start_game(signals, kind),
            div { class: "text-5xl mb-4", "{icon}" }
            h3 { class: "font-pixel text-xl text-foreground mb-2", "{title}" }
            p { class: "text-muted-foreground text-sm mb-4", "{blurb}" }
            div { class: "flex items-center justify-center gap-2 text-sm text-primary",
                span { "\u{2B50} Play to earn APT" }
            }
        }
    }
}

#[derive(Props, Clone)]
struct PlayAreaProps {
    signals: ArcadeSignals,
    account: WalletAccount,
    game: GameState,
    kind: GameKind,
}

impl PartialEq for PlayAreaProps {
    fn eq(&self, other: &Self) -> bool {
        self.account == other.account && self.game == other.game && self.kind == other.kind
    }
}

#[component]
fn PlayArea(props: PlayAreaProps) -> Element {
    let signals = props.signals;
    let account = props.account.clone();
    let game = props.game.clone();
    let kind = props.kind;

    let title = kind.title();
    let score = game.score;
    let time_left = game.time_left;

    rsx! {
        div { class: "retro-panel p-8",
            // Game header
            div { class: "flex items-center justify-between mb-6",
                div { class: "flex items-center gap-4",
                    button {
                        class: "retro-button bg-muted text-muted-foreground hover:bg-muted/80 px-4 py-2",
                        onclick: move |_| reset_game(signals),
                        "\u{2190} Back to Games"
                    }
                    h2 { class: "font-pixel text-2xl text-foreground", "{title}" }
                }

                div { class: "flex items-center gap-6",
                    div { class: "text-center",
                        div { class: "font-pixel text-lg text-primary", "Score" }
                        div { class: "font-nunito text-2xl font-bold", "{score}" }
                    }
                    div { class: "text-center",
                        div { class: "font-pixel text-lg text-secondary", "Time" }
                        div { class: "font-nunito text-2xl font-bold", "{time_left}s" }
                    }
                }
            }

            // Game content
            div { class: "relative",
                {match kind {
                    GameKind::Target => rsx! { TargetField { signals } },
                    GameKind::Chase => rsx! { ChaseField { signals } },
                    GameKind::Puzzle => rsx! { PuzzleGrid { signals } },
                }}

                if game.game_over {
                    GameOverPanel { signals, account, game: game.clone(), kind }
                }
            }

            // Instructions
            div { class: "mt-6 text-center text-muted-foreground",
                {match kind {
                    GameKind::Target => rsx! { p { "\u{1F3AF} Click on the targets to score points! Targets respawn automatically." } },
                    GameKind::Chase => rsx! { p { "\u{1F431} Click on the mouse to move it away from the cat! The cat gets faster over time." } },
                    GameKind::Puzzle => rsx! { p { "\u{1F9E9} Click on numbers next to the empty space to slide them. Arrange 1-8 in order!" } },
                }}
            }
        }
    }
}

#[derive(Props, Clone)]
struct FieldProps {
    signals: ArcadeSignals,
}

impl PartialEq for FieldProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn TargetField(props: FieldProps) -> Element {
    let signals = props.signals;
    let targets = signals.targets.read().clone();

    rsx! {
        div { class: "relative w-full h-64 bg-muted rounded-lg border-2 border-border overflow-hidden",
            {targets.iter().map(|target| {
                let id = target.id;
                let x = target.x as i32;
                let y = target.y as i32;
                let size = target.size as i32;
                rsx! {
                    button {
                        key: "{id}",
                        class: "absolute bg-primary rounded-full hover:bg-primary/80 transition-colors",
                        style: "left: {x}px; top: {y}px; width: {size}px; height: {size}px; transform: translate(-50%, -50%);",
                        onclick: move |_| hit_target(signals, id),
                    }
                }
            })}
            if targets.is_empty() {
                div { class: "absolute inset-0 flex items-center justify-center",
                    div { class: "text-muted-foreground", "Generating new targets..." }
                }
            }
        }
    }
}

#[component]
fn ChaseField(props: FieldProps) -> Element {
    let signals = props.signals;
    let chase = signals.chase.read().clone();
    let cat_x = chase.cat.0 as i32;
    let cat_y = chase.cat.1 as i32;
    let mouse_x = chase.mouse.0 as i32;
    let mouse_y = chase.mouse.1 as i32;

    rsx! {
        div { class: "relative w-full h-64 bg-muted rounded-lg border-2 border-border overflow-hidden",
            div {
                class: "absolute transition-all duration-100 text-xl",
                style: "left: {cat_x}px; top: {cat_y}px; transform: translate(-50%, -50%);",
                "\u{1F431}"
            }
            button {
                class: "absolute text-base",
                style: "left: {mouse_x}px; top: {mouse_y}px; transform: translate(-50%, -50%);",
                onclick: move |_| dodge_mouse(signals),
                "\u{1F42D}"
            }
        }
    }
}

#[component]
fn PuzzleGrid(props: FieldProps) -> Element {
    let signals = props.signals;
    let pieces = signals.puzzle.read().clone();

    rsx! {
        div { class: "flex justify-center",
            div { class: "grid grid-cols-3 gap-2 p-4 bg-muted rounded-lg",
                {pieces.iter().map(|&piece| {
                    let blank = piece == PUZZLE_BLANK;
                    let label = if blank { String::new() } else { piece.to_string() };
                    let class = if blank {
                        "w-16 h-16 bg-transparent"
                    } else {
                        "w-16 h-16 flex items-center justify-center text-xl font-bold bg-primary text-primary-foreground hover:bg-primary/80 transition-colors"
                    };
                    rsx! {
                        button {
                            class: "{class}",
                            disabled: blank,
                            onclick: move |_| slide_piece(signals, piece),
                            "{label}"
                        }
                    }
                })}
            }
        }
    }
}

#[derive(Props, Clone)]
struct GameOverProps {
    signals: ArcadeSignals,
    account: WalletAccount,
    game: GameState,
    kind: GameKind,
}

impl PartialEq for GameOverProps {
    fn eq(&self, other: &Self) -> bool {
        self.account == other.account && self.game == other.game && self.kind == other.kind
    }
}

#[component]
fn GameOverPanel(props: GameOverProps) -> Element {
    let signals = props.signals;
    let account = props.account.clone();
    let kind = props.kind;
    let score = props.game.score;
    let reward = game_reward(score);

    let claiming = *signals.claiming.read();
    let claimed = *signals.claimed.read();
    let claim_error = signals.claim_error.read().clone();

    let headline = if score > 50 {
        "\u{1F389} Great Job!"
    } else {
        "\u{1F60A} Good Try!"
    };
    let reward_note = if score >= 10 {
        format!("{} points earned the reward!", score / 10)
    } else {
        "Minimum 1 APT reward guaranteed!".to_string()
    };

    rsx! {
        div { class: "absolute inset-0 bg-black/50 flex items-center justify-center rounded-lg",
            div { class: "bg-background border-2 border-foreground p-8 text-center rounded-lg max-w-md",
                div { class: "font-pixel text-3xl text-foreground mb-4", "{headline}" }
                div { class: "text-xl text-muted-foreground mb-4",
                    "Final Score: " span { class: "font-bold text-primary", "{score}" }
                }

                div { class: "bg-primary/10 border border-primary/20 rounded-lg p-4 mb-6",
                    div { class: "font-pixel text-sm text-primary mb-2", "\u{2B50} REWARD AVAILABLE \u{2B50}" }
                    div { class: "text-2xl font-bold text-primary mb-1", "{reward} APT" }
                    div { class: "text-xs text-muted-foreground", "{reward_note}" }
                }

                if !claimed {
                    div { class: "space-y-3",
                        button {
                            class: "retro-button bg-secondary text-secondary-foreground hover:bg-secondary/90 disabled:opacity-50 disabled:cursor-not-allowed w-full py-3",
                            disabled: claiming,
                            onclick: move |_| {
                                let account = account.clone();
                                spawn(claim_reward(signals, account, kind, score));
                            },
                            if claiming { "CLAIMING..." } else { "\u{1FA99} CLAIM {reward} APT" }
                        }

                        if let Some(error) = claim_error {
                            div { class: "text-red-500 text-sm bg-red-500/10 border border-red-500/20 rounded p-2",
                                "{error}"
                            }
                        }
                    }
                } else {
                    div { class: "bg-green-500/10 border border-green-500/20 rounded-lg p-4 mb-4",
                        div { class: "font-pixel text-sm text-green-500 mb-2", "\u{2B50} REWARD CLAIMED! \u{2B50}" }
                        div { class: "text-sm text-muted-foreground",
                            "{reward} APT has been added to your wallet"
                        }
                    }
                }

                button {
                    class: "retro-button bg-primary text-primary-foreground hover:bg-primary/90 px-6 py-2 mt-4",
                    onclick: move |_| reset_game(signals),
                    if claimed { "Play Again" } else { "Skip Reward & Play Again" }
                }
            }
        }
    }
}

// ---- Game drivers ----

fn random() -> f64 {
    #[cfg(feature = "web")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(feature = "web"))]
    {
        0.5
    }
}

fn start_game(mut signals: ArcadeSignals, kind: GameKind) {
    let token = {
        let mut run = signals.run.write();
        *run += 1;
        *run
    };

    signals.selected.set(Some(kind));
    signals.game.set(GameState::start());
    signals.claiming.set(false);
    signals.claimed.set(false);
    signals.claim_error.set(None);

    match kind {
        GameKind::Target => {
            let mut counter = *signals.next_target_id.read();
            let wave = spawn_targets(&mut counter, random);
            signals.next_target_id.set(counter);
            signals.targets.set(wave);
        }
        GameKind::Chase => signals.chase.set(ChaseState::default()),
        GameKind::Puzzle => signals.puzzle.set(shuffled_puzzle(random)),
    }

    spawn(run_countdown(signals, token));
    if kind == GameKind::Chase {
        spawn(run_chase(signals, token));
    }
}

fn reset_game(mut signals: ArcadeSignals) {
    *signals.run.write() += 1; // stops any live timer loops
    signals.selected.set(None);
    signals.game.set(GameState::default());
    signals.claiming.set(false);
    signals.claimed.set(false);
    signals.claim_error.set(None);
}

async fn run_countdown(mut signals: ArcadeSignals, token: u32) {
    loop {
        gloo_timers::future::TimeoutFuture::new(COUNTDOWN_TICK_MS).await;
        if *signals.run.read() != token || !signals.game.read().is_playing {
            break;
        }
        signals.game.write().tick();
        if signals.game.read().game_over {
            break;
        }
    }
}

async fn run_chase(mut signals: ArcadeSignals, token: u32) {
    loop {
        gloo_timers::future::TimeoutFuture::new(CHASE_TICK_MS).await;
        if *signals.run.read() != token || !signals.game.read().is_playing {
            break;
        }
        let caught = signals.chase.write().step_cat();
        if caught {
            signals.game.write().score += CHASE_SCORE;
            let mut chase = signals.chase.write();
            chase.relocate_mouse(random);
            chase.ramp_speed();
        }
    }
}

fn hit_target(mut signals: ArcadeSignals, id: u32) {
    if !signals.game.read().is_playing {
        return;
    }
    let mut targets = signals.targets.write();
    let Some(position) = targets.iter().position(|t| t.id == id) else {
        return;
    };
    targets.remove(position);
    signals.game.write().score += TARGET_SCORE;

    if targets.is_empty() {
        let mut counter = *signals.next_target_id.read();
        let wave = spawn_targets(&mut counter, random);
        *targets = wave;
        drop(targets);
        signals.next_target_id.set(counter);
    }
}

fn dodge_mouse(mut signals: ArcadeSignals) {
    if !signals.game.read().is_playing {
        return;
    }
    signals.chase.write().relocate_mouse(random);
}

fn slide_piece(mut signals: ArcadeSignals, piece: u8) {
    if !signals.game.read().is_playing {
        return;
    }
    let solved = {
        let mut pieces = signals.puzzle.write();
        try_slide(pieces.as_mut_slice(), piece) && puzzle_is_solved(&pieces)
    };
    if solved {
        let mut game = signals.game.write();
        game.score += PUZZLE_SCORE;
        game.is_playing = false;
        game.game_over = true;
    }
}

async fn claim_reward(
    mut signals: ArcadeSignals,
    account: WalletAccount,
    kind: GameKind,
    score: u64,
) {
    signals.claiming.set(true);
    signals.claim_error.set(None);

    match hooks::client().claim_game_reward(&account, kind, score).await {
        Ok(()) => signals.claimed.set(true),
        Err(err) => {
            signals
                .claim_error
                .set(Some(format!("Failed to claim reward: {err}")));
        }
    }
    signals.claiming.set(false);
}
