use crate::levels;
use clap::Args;
use game::{Color, GridPos};
use knitout_core as game;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewBobbin {
    Empty,
    Ready(Color),
    Used(Color),
    Locked(Color),
}

impl ViewBobbin {
    fn at(state: &game::GameState, pos: GridPos) -> Self {
        match state.tokens().token_at(pos) {
            None => Self::Empty,
            Some(color) if state.is_used(pos) => Self::Used(color),
            Some(color) if state.status().is_finished() => Self::Locked(color),
            Some(color) => Self::Ready(color),
        }
    }

    const fn is_disabled(self) -> bool {
        matches!(self, Self::Used(_) | Self::Locked(_))
    }
}

fn color_class(color: Option<Color>) -> String {
    format!("color-{}", color.map_or(-1, i32::from))
}

fn color_label(color: Option<Color>) -> String {
    color.map(|color| color.to_string()).unwrap_or_default()
}

/// Carpet pieces by display row, top row first. Columns are bottom aligned and show their front
/// piece at the top of the stack.
fn carpet_rows(columns: &game::Columns) -> Vec<Vec<Option<Color>>> {
    let height = columns.height();
    (0..height)
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    let offset = height - column.len();
                    row.checked_sub(offset)
                        .and_then(|index| column.as_slice().get(index).copied())
                })
                .collect()
        })
        .collect()
}

fn slot_label(slot: Option<game::Slot>) -> String {
    slot.map(|slot| format!("{} ({})", slot.color(), slot.collected()))
        .unwrap_or_default()
}

fn status_banner(status: game::GameStatus) -> Option<&'static str> {
    match status {
        game::GameStatus::Playing => None,
        game::GameStatus::Won => Some("WON"),
        game::GameStatus::Lost => Some("LOST"),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    BobbinClicked(GridPos),
    Restart,
}

#[derive(Properties, Clone, PartialEq)]
struct BobbinProps {
    pos: GridPos,
    bobbin: ViewBobbin,
    callback: Callback<GridPos>,
}

#[function_component(BobbinView)]
fn bobbin_component(props: &BobbinProps) -> Html {
    use ViewBobbin::*;

    let BobbinProps {
        pos,
        bobbin,
        callback,
    } = props.clone();

    let class = classes!(
        "bobbin-tile",
        match bobbin {
            Empty => classes!(color_class(None)),
            Ready(color) => classes!(color_class(Some(color))),
            Used(color) => classes!(color_class(Some(color)), "used"),
            Locked(color) => classes!(color_class(Some(color)), "locked"),
        }
    );
    let label = match bobbin {
        Empty => String::new(),
        Ready(color) | Used(color) | Locked(color) => color_label(Some(color)),
    };
    let disabled = bobbin.is_disabled();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("bobbin {:?} clicked", pos);
        callback.emit(pos);
    });

    html! {
        <button {class} {onclick} {disabled}>{label}</button>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Bundled level to play
    #[arg(short, long)]
    pub(crate) level: Option<String>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    engine: game::Result<game::PlayEngine>,
}

impl GameView {
    fn load_engine(props: &GameProps) -> game::Result<game::PlayEngine> {
        let level = levels::load(props.level.as_deref())?;
        game::PlayEngine::from_level(&level)
    }

    fn click(&mut self, pos: GridPos) -> bool {
        let Ok(engine) = self.engine.as_mut() else {
            return false;
        };

        match engine.click(pos) {
            Ok(outcome) => {
                log::debug!("click {:?}: {:?}", pos, outcome);
                true
            }
            Err(err) if err.notifies_player() => {
                log::info!("click {:?} refused: {}", pos, err);
                gloo::dialogs::alert(&err.to_string());
                false
            }
            Err(err) => {
                log::trace!("click {:?} ignored: {}", pos, err);
                false
            }
        }
    }

    fn view_carpets(state: &game::GameState) -> Html {
        let recent = state.recent_collections();

        html! {
            <table class="carpet-grid">
                {
                    for carpet_rows(state.columns()).into_iter().map(|row| html! {
                        <tr class="carpet-row">
                            {
                                for row.into_iter().enumerate().map(|(col, piece)| {
                                    let class = classes!(
                                        "carpet-tile",
                                        color_class(piece),
                                        recent.contains(&col).then_some("recent"),
                                    );
                                    html! { <td {class}>{color_label(piece)}</td> }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_slots(state: &game::GameState) -> Html {
        html! {
            <div class="active-slots">
                {
                    for state.slots().iter().map(|slot| {
                        let class = classes!("slot", color_class(slot.map(game::Slot::color)));
                        html! { <div {class}>{slot_label(slot)}</div> }
                    })
                }
            </div>
        }
    }

    fn view_bobbins(ctx: &Context<Self>, state: &game::GameState) -> Html {
        let (rows, cols) = state.tokens().size();
        let callback = ctx.link().callback(Msg::BobbinClicked);

        html! {
            <div class="bobbin-grid">
                {
                    for (0..rows).map(|row| html! {
                        <div class="bobbin-row">
                            {
                                for (0..cols).map(|col| {
                                    let pos = GridPos::new(row, col);
                                    let bobbin = ViewBobbin::at(state, pos);
                                    let callback = callback.clone();
                                    html! { <BobbinView {pos} {bobbin} {callback}/> }
                                })
                            }
                        </div>
                    })
                }
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let engine = Self::load_engine(ctx.props());
        if let Err(err) = &engine {
            log::error!("failed to load level: {}", err);
        }
        Self { engine }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::BobbinClicked(pos) => self.click(pos),
            Msg::Restart => {
                log::debug!("restart");
                self.engine = Self::load_engine(ctx.props());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let engine = match &self.engine {
            Ok(engine) => engine,
            Err(err) => {
                return html! {
                    <div class="knitout">
                        <p class="error">{format!("Could not load level: {}", err)}</p>
                    </div>
                };
            }
        };
        let state = engine.state();
        let cb_restart = ctx.link().callback(|_: MouseEvent| Msg::Restart);

        html! {
            <div class="knitout">
                <h1>{"KnitOut"}</h1>
                {Self::view_carpets(state)}
                {Self::view_slots(state)}
                {Self::view_bobbins(ctx, state)}
                if let Some(banner) = status_banner(state.status()) {
                    <div class="status">{banner}</div>
                }
                <button class="restart" onclick={cb_restart}>{"Restart"}</button>
            </div>
        }
    }
}
