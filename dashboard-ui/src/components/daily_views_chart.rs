//! Daily Views Chart Component
//!
//! 30-day views line chart drawn on an HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::api;
use crate::components::Loading;
use crate::format::{format_axis_tick, format_date_short};
use crate::state::global::{is_current_response, DailyViews};

/// Days shown by the chart
pub const CHART_DAYS: u32 = 30;

const LINE_COLOR: &str = "#3b82f6"; // blue-500
const FILL_COLOR: &str = "rgba(59, 130, 246, 0.15)";
const GRID_COLOR: &str = "#e5e7eb"; // gray-200
const LABEL_COLOR: &str = "#6b7280"; // gray-500

const Y_TICKS: usize = 5;
const X_LABELS: usize = 6;

/// Daily views chart for one account
#[component]
pub fn DailyViewsChart(
    #[prop(into)]
    account: Signal<Option<String>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let points = create_rw_signal(Vec::<DailyViews>::new());
    let loading = create_rw_signal(false);

    // Refetch whenever the account changes
    create_effect(move |_| {
        let Some(requested) = account.get() else {
            points.set(Vec::new());
            loading.set(false);
            return;
        };

        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_daily_views(&requested, CHART_DAYS).await;

            if !is_current_response(&requested, account.get_untracked().as_deref()) {
                return;
            }

            match result {
                Ok(series) => points.set(series),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch daily views: {}", e).into());
                }
            }
            loading.set(false);
        });
    });

    // Redraw once data is in and the canvas is mounted
    create_effect(move |_| {
        let data = points.get();
        if loading.get() {
            return;
        }
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &data);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="320"
                class="w-full h-64 md:h-80"
                class:hidden=move || loading.get()
            />
            <Show when=move || loading.get()>
                <Loading />
            </Show>
        </div>
    }
}

/// Top of the y axis: the smallest 1/2/5 x 10^k at or above `max`
pub fn axis_max(max: u64) -> f64 {
    if max == 0 {
        return 1.0;
    }

    let max = max as f64;
    let magnitude = 10f64.powf(max.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= max)
        .unwrap_or(10.0 * magnitude)
}

/// Indexes of the points that get an x label
pub fn x_label_indexes(len: usize, labels: usize) -> Vec<usize> {
    if len == 0 || labels == 0 {
        return Vec::new();
    }
    if len <= labels {
        return (0..len).collect();
    }

    let step = (len - 1) as f64 / (labels - 1).max(1) as f64;
    let mut indexes: Vec<usize> = (0..labels)
        .map(|i| (i as f64 * step).round() as usize)
        .collect();
    indexes.dedup();
    indexes
}

fn draw_chart(canvas: &HtmlCanvasElement, data: &[DailyViews]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.clear_rect(0.0, 0.0, width, height);

    if data.is_empty() {
        ctx.set_fill_style(&LABEL_COLOR.into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No views in this period", width / 2.0 - 80.0, height / 2.0);
        return;
    }

    let y_max = axis_max(data.iter().map(|p| p.views).max().unwrap_or(0));

    // Horizontal grid and y labels, starting at zero
    ctx.set_stroke_style(&GRID_COLOR.into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=Y_TICKS {
        let fraction = i as f64 / Y_TICKS as f64;
        let y = margin_top + fraction * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&format_axis_tick(y_max * (1.0 - fraction)), 5.0, y + 4.0);
    }

    let x_step = if data.len() > 1 {
        chart_width / (data.len() - 1) as f64
    } else {
        0.0
    };
    let x_at = |i: usize| margin_left + i as f64 * x_step;
    let y_at = |views: u64| margin_top + (1.0 - views as f64 / y_max) * chart_height;
    let baseline = margin_top + chart_height;

    // Filled area under the line
    ctx.set_fill_style(&FILL_COLOR.into());
    ctx.begin_path();
    ctx.move_to(x_at(0), baseline);
    for (i, point) in data.iter().enumerate() {
        ctx.line_to(x_at(i), y_at(point.views));
    }
    ctx.line_to(x_at(data.len() - 1), baseline);
    ctx.close_path();
    ctx.fill();

    // Line
    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in data.iter().enumerate() {
        if i == 0 {
            ctx.move_to(x_at(i), y_at(point.views));
        } else {
            ctx.line_to(x_at(i), y_at(point.views));
        }
    }
    ctx.stroke();

    // X labels
    ctx.set_fill_style(&LABEL_COLOR.into());
    for i in x_label_indexes(data.len(), X_LABELS) {
        let _ = ctx.fill_text(&format_date_short(&data[i].date), x_at(i) - 15.0, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_max() {
        assert_eq!(axis_max(0), 1.0);
        assert_eq!(axis_max(1), 1.0);
        assert_eq!(axis_max(7), 10.0);
        assert_eq!(axis_max(130), 200.0);
        assert_eq!(axis_max(450), 500.0);
        assert_eq!(axis_max(1_500), 2_000.0);
        assert_eq!(axis_max(6_200_000), 10_000_000.0);
    }

    #[test]
    fn test_x_label_indexes() {
        assert!(x_label_indexes(0, 6).is_empty());
        assert_eq!(x_label_indexes(3, 6), vec![0, 1, 2]);

        let indexes = x_label_indexes(31, 6);
        assert_eq!(indexes.first(), Some(&0));
        assert_eq!(indexes.last(), Some(&30));
        assert_eq!(indexes.len(), 6);
    }
}
