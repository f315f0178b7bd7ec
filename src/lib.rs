pub mod canvas;
pub mod config;
pub mod error;
pub mod raffle;
pub mod roster;
pub mod wheel;

use canvas::WheelCanvas;
use config::{load_config, WheelConfig};
use error::RaffleError;
use gloo_file::futures::read_as_text;
use gloo_timers::callback::Timeout;
use log::{error, info};
use raffle::{Raffle, RaffleAction};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

fn report(err: &RaffleError) {
    match err.user_message() {
        Some(message) => alert(&message),
        None => error!("{}", err),
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_state(load_config);
    let raffle = use_reducer(Raffle::default);
    let file_input = use_node_ref();

    // Arms the settle timer once the reducer has accepted a spin. Dropping
    // the timer on cleanup cancels it when the spin is cleared.
    {
        let pending_id = raffle.pending_spin().map(|plan| plan.id);
        let raffle = raffle.clone();
        let duration = config.spin_duration_ms;
        use_effect_with_deps(
            move |pending: &Option<u64>| {
                let timeout = pending.map(|spin_id| {
                    Timeout::new(duration, move || {
                        raffle.dispatch(RaffleAction::Settle(spin_id));
                    })
                });
                move || drop(timeout)
            },
            pending_id,
        );
    }

    {
        let winner = raffle.winner().map(str::to_owned);
        use_effect_with_deps(
            move |settled: &Option<u64>| {
                if let (Some(_), Some(name)) = (settled, winner) {
                    alert(&format!("Congratulations {}!", name));
                }
                || ()
            },
            raffle.last_settled(),
        );
    }

    let on_import_file = {
        let raffle = raffle.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                report(&RaffleError::NoFileSelected);
                return;
            };
            // lets the same file be picked again
            input.set_value("");

            let raffle = raffle.clone();
            let file = gloo_file::File::from(file);
            spawn_local(async move {
                match read_as_text(&file).await {
                    Ok(text) => raffle.dispatch(RaffleAction::Import(text)),
                    Err(err) => report(&RaffleError::file_read(err)),
                }
            });
        })
    };

    let open_file_picker = {
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_text_input = {
        let raffle = raffle.clone();
        Callback::from(move |event: InputEvent| {
            let textarea: HtmlTextAreaElement = event.target_unchecked_into();
            raffle.dispatch(RaffleAction::ReplaceText(textarea.value()));
        })
    };

    let on_clear = {
        let raffle = raffle.clone();
        Callback::from(move |_: MouseEvent| raffle.dispatch(RaffleAction::Clear))
    };

    let on_spin = {
        let raffle = raffle.clone();
        let config = config.clone();
        Callback::from(move |_: MouseEvent| {
            let plan = match raffle.plan_spin(&config, &mut rand::thread_rng()) {
                Ok(plan) => plan,
                Err(err) => {
                    report(&err);
                    return;
                }
            };

            info!("Spinning the wheel for {} participants", raffle.roster().len());
            raffle.dispatch(RaffleAction::Begin(plan));
        })
    };

    let spinning = raffle.is_spinning();
    let wheel_style = wheel_style(raffle.rotation(), &config);

    html! {
        <div class="container">
            <div class="main">
                <div class="wheel-section">
                    <div class="wheel" style={wheel_style}>
                        <WheelCanvas
                            names={raffle.roster().names().to_vec()}
                            config={(*config).clone()} />
                    </div>
                    <div class="pointer"></div>
                    {
                        match raffle.winner() {
                            Some(name) if !spinning => html! {
                                <div class="winner-message">
                                    { "Congratulations " }<span>{ name }</span>{ " !!" }
                                </div>
                            },
                            _ => html! {},
                        }
                    }
                </div>
                <div class="list-section">
                    <h3>{ "Build the raffle list:" }</h3>
                    <div>
                        { "Participants: " }<span>{ raffle.roster().len() }</span>
                    </div>
                    <input
                        type="file"
                        ref={file_input}
                        accept=".csv"
                        style="display: none"
                        onchange={on_import_file} />
                    <textarea
                        id="dataInput"
                        placeholder="Enter participants, one per line"
                        value={raffle.roster().as_text()}
                        readonly={spinning}
                        oninput={on_text_input} />
                    <button class="csv-button" disabled={spinning} onclick={open_file_picker}>
                        { "Import CSV" }
                    </button>
                    <button class="clear-button" onclick={on_clear}>
                        { "Clear" }
                    </button>
                    <button class="start-button" disabled={spinning} onclick={on_spin}>
                        { if spinning { "Spinning…" } else { "Spin" } }
                    </button>
                </div>
            </div>
        </div>
    }
}

fn wheel_style(rotation: f64, config: &WheelConfig) -> String {
    format!(
        "transform: rotate({:.3}deg); transition: transform {:.2}s ease-out;",
        rotation,
        config.spin_duration_secs()
    )
}

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
