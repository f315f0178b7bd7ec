use log::error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::config::WheelConfig;
use crate::error::RaffleError;
use crate::wheel::layout;

const LABEL_COLOR: &str = "#000";
const LABEL_OFFSET_Y: f64 = 10.0;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub names: Vec<String>,
    pub config: WheelConfig,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with_deps(
            move |(names, config): &(Vec<String>, WheelConfig)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    if let Err(err) = paint(&canvas, names, config) {
                        error!("Failed to draw the wheel: {}", err);
                    }
                }
                || ()
            },
            (props.names.clone(), props.config.clone()),
        );
    }

    let size = props.config.canvas_size.to_string();
    html! {
        <canvas ref={canvas_ref} width={size.clone()} height={size}></canvas>
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, RaffleError> {
    canvas
        .get_context("2d")
        .map_err(RaffleError::canvas)?
        .ok_or_else(|| RaffleError::Canvas("2d context unavailable".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(RaffleError::canvas)
}

/// Repaints the whole wheel. An empty roster leaves a blank canvas.
pub fn paint(
    canvas: &HtmlCanvasElement,
    names: &[String],
    config: &WheelConfig,
) -> Result<(), RaffleError> {
    let ctx = context_2d(canvas)?;
    let width = f64::from(canvas.width());
    let height = f64::from(canvas.height());
    let radius = width.min(height) / 2.0;

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
        .map_err(RaffleError::canvas)?;
    ctx.clear_rect(0.0, 0.0, width, height);
    if names.is_empty() {
        return Ok(());
    }

    ctx.translate(radius, radius).map_err(RaffleError::canvas)?;
    ctx.set_font(&config.label_font);
    ctx.set_text_align("right");

    for (segment, name) in layout(names.len()).iter().zip(names) {
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.arc(0.0, 0.0, radius, segment.start, segment.end)
            .map_err(RaffleError::canvas)?;
        ctx.set_fill_style(&JsValue::from_str(&config.slice_color(segment.hue)));
        ctx.fill();

        ctx.save();
        ctx.rotate(segment.label_angle()).map_err(RaffleError::canvas)?;
        ctx.set_fill_style(&JsValue::from_str(LABEL_COLOR));
        ctx.fill_text(name, radius - config.label_inset, LABEL_OFFSET_Y)
            .map_err(RaffleError::canvas)?;
        ctx.restore();
    }

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
        .map_err(RaffleError::canvas)?;
    Ok(())
}
