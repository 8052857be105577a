use std::rc::Rc;

use leptos::html::Canvas;
use leptos::*;
use strum::IntoEnumIterator;

use crate::application::{AnimationFrameRequester, FrameReport, HeatmapCoordinator, HeatmapHandle};
use crate::config::HeatmapConfig;
use crate::domain::{
    chain_data::MetricDomain,
    heatmap::{ColorField, ColorRamp, ColorScaleKind},
    logging::LogComponent,
};
use crate::event_utils::{EventOptions, event_listener_with_options, window_event_listener_with_options};
use crate::infrastructure::{
    ChainDataClient,
    rendering::{CanvasRenderer, CanvasSize, render_legend},
};
use crate::log_error;
use crate::time_utils::current_year;

type CanvasHandle = HeatmapHandle<CanvasRenderer>;

#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready { days: usize, blocks: usize },
    Failed(String),
}

/// Signals shared by the sidebar and the heatmap canvas
#[derive(Clone, Copy)]
struct UiState {
    field: RwSignal<ColorField>,
    scale_kind: RwSignal<ColorScaleKind>,
    effective_kind: RwSignal<ColorScaleKind>,
    log_supported: RwSignal<bool>,
    legend_domain: RwSignal<Option<MetricDomain>>,
    scale: RwSignal<f64>,
    status: RwSignal<LoadStatus>,
    palette: ColorRamp,
}

impl UiState {
    fn new(config: &HeatmapConfig) -> Self {
        Self {
            field: create_rw_signal(ColorField::default()),
            scale_kind: create_rw_signal(ColorScaleKind::default()),
            effective_kind: create_rw_signal(ColorScaleKind::default()),
            log_supported: create_rw_signal(true),
            legend_domain: create_rw_signal(None),
            scale: create_rw_signal(config.viewport.initial_scale),
            status: create_rw_signal(LoadStatus::Loading),
            palette: config.palette,
        }
    }

    /// Copy the coordinator's derived display options into the signals.
    fn publish(&self, handle: &CanvasHandle) {
        let (effective, log_supported, domain, scale) = handle.read(|c| {
            (c.effective_scale_kind(), c.supports_scale_kind(ColorScaleKind::Log10), c.legend_domain(), c.scale())
        });
        self.effective_kind.set(effective);
        self.log_supported.set(log_supported);
        self.legend_domain.set(domain);
        self.scale.set(scale);
    }
}

fn field_label(field: ColorField) -> &'static str {
    match field {
        ColorField::TransactionCount => "Transactions",
        ColorField::ByteSize => "Block size",
        ColorField::MintedValue => "Minted",
        ColorField::OutputValue => "Output value",
        ColorField::PriceUsd => "Price (USD)",
    }
}

fn scale_label(kind: ColorScaleKind) -> &'static str {
    match kind {
        ColorScaleKind::Linear => "Linear",
        ColorScaleKind::Log2 => "Log₂",
        ColorScaleKind::Log10 => "Log₁₀",
        ColorScaleKind::LogN => "Ln",
    }
}

/// Blockchain activity calendar: sidebar controls plus the zoomable heatmap.
#[component]
pub fn App(#[prop(optional)] config: Option<HeatmapConfig>) -> impl IntoView {
    let config = config.unwrap_or_default();
    let ui = UiState::new(&config);
    provide_context(ui);

    view! {
        <style>
            {r#"
            .blockmap-app {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
                display: flex;
                height: 100vh;
                margin: 0;
                background: #0f172a;
                color: #e2e8f0;
            }
            .sidebar {
                width: 220px;
                padding: 16px;
                display: flex;
                flex-direction: column;
                gap: 16px;
                background: #1e293b;
                border-right: 1px solid #334155;
            }
            .sidebar fieldset {
                border: 1px solid #334155;
                border-radius: 6px;
                padding: 8px 10px;
            }
            .sidebar label {
                display: block;
                font-size: 13px;
                margin: 4px 0;
            }
            .sidebar label.disabled {
                color: #64748b;
            }
            .scale-readout, .status {
                font-size: 12px;
                color: #94a3b8;
            }
            .status.error {
                color: #ef4444;
            }
            .heatmap-wrapper {
                flex: 1;
                position: relative;
                overflow: hidden;
            }
            .heatmap-wrapper canvas {
                display: block;
                width: 100%;
                height: 100%;
                cursor: grab;
            }
            "#}
        </style>
        <div class="blockmap-app">
            <Sidebar />
            <HeatmapCanvas config=config />
        </div>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let ui = expect_context::<UiState>();

    view! {
        <aside class="sidebar">
            <fieldset>
                <legend>"Value"</legend>
                {ColorField::iter()
                    .map(|field| {
                        view! {
                            <label>
                                <input
                                    type="radio"
                                    name="color-field"
                                    value=field.as_ref().to_string()
                                    prop:checked=move || ui.field.get() == field
                                    on:change=move |_| ui.field.set(field)
                                />
                                {field_label(field)}
                            </label>
                        }
                    })
                    .collect_view()}
            </fieldset>
            <fieldset>
                <legend>"Scale"</legend>
                {ColorScaleKind::iter()
                    .map(|kind| {
                        let unavailable = move || kind.is_logarithmic() && !ui.log_supported.get();
                        view! {
                            <label class:disabled=unavailable>
                                <input
                                    type="radio"
                                    name="scale-kind"
                                    value=kind.as_ref().to_string()
                                    prop:checked=move || ui.effective_kind.get() == kind
                                    prop:disabled=unavailable
                                    on:change=move |_| ui.scale_kind.set(kind)
                                />
                                {scale_label(kind)}
                            </label>
                        }
                    })
                    .collect_view()}
            </fieldset>
            <Legend />
            <div class="scale-readout">{move || format!("Scale: {:.2}×", ui.scale.get())}</div>
            <div class="status" class:error=move || matches!(ui.status.get(), LoadStatus::Failed(_))>
                {move || match ui.status.get() {
                    LoadStatus::Loading => "Loading chain data…".to_string(),
                    LoadStatus::Ready { days, blocks } => format!("{} days, {} blocks", days, blocks),
                    LoadStatus::Failed(message) => format!("Failed to load: {}", message),
                }}
            </div>
        </aside>
    }
}

#[component]
fn Legend() -> impl IntoView {
    let ui = expect_context::<UiState>();
    let legend_ref = create_node_ref::<Canvas>();

    create_effect(move |_| {
        let domain = ui.legend_domain.get();
        let kind = ui.effective_kind.get();
        let Some(canvas) = legend_ref.get() else {
            return;
        };
        let size = CanvasSize::new(canvas.width() as f64, canvas.height() as f64);
        let result = CanvasRenderer::from_canvas(&canvas)
            .and_then(|mut surface| render_legend(&mut surface, size, &ui.palette, domain, kind));
        if let Err(e) = result {
            log_error!(LogComponent::Presentation("Legend"), "Legend draw failed: {}", e);
        }
    });

    view! { <canvas node_ref=legend_ref width="188" height="36" /> }
}

#[component]
fn HeatmapCanvas(config: HeatmapConfig) -> impl IntoView {
    let ui = expect_context::<UiState>();
    let canvas_ref = create_node_ref::<Canvas>();
    let handle = store_value(None::<CanvasHandle>);

    let with_handle = move |f: &dyn Fn(&CanvasHandle)| {
        handle.with_value(|h| {
            if let Some(h) = h {
                f(h);
            }
        })
    };

    // Mount: size the canvas, build the coordinator, attach listeners, start loading.
    create_effect(move |mounted: Option<bool>| {
        if mounted == Some(true) {
            return true;
        }
        let Some(canvas) = canvas_ref.get() else {
            return false;
        };
        let (width, height) = (canvas.client_width().max(1) as u32, canvas.client_height().max(1) as u32);
        canvas.set_width(width);
        canvas.set_height(height);

        let surface = match CanvasRenderer::from_canvas(&canvas) {
            Ok(surface) => surface,
            Err(e) => {
                ui.status.set(LoadStatus::Failed(e.to_string()));
                return true;
            }
        };
        let mut coordinator = HeatmapCoordinator::new(
            surface,
            config.clone(),
            CanvasSize::new(width as f64, height as f64),
            current_year(),
        );
        coordinator.set_color_field(ui.field.get_untracked());
        coordinator.set_scale_kind(ui.scale_kind.get_untracked());

        let new_handle = HeatmapHandle::new(coordinator, Box::new(AnimationFrameRequester::new()));
        new_handle.set_on_frame(move |report: FrameReport| ui.scale.set(report.scale));
        new_handle.request_render();

        let wheel_handle = new_handle.clone();
        let wheel = event_listener_with_options(
            &canvas,
            ev::wheel,
            &EventOptions::active(),
            move |event: web_sys::WheelEvent| {
                event.prevent_default();
                wheel_handle
                    .update(|c| c.wheel(event.offset_x() as f64, event.offset_y() as f64, event.delta_y()));
            },
        );

        let release_handle = new_handle.clone();
        let release = window_event_listener_with_options(ev::mouseup, &EventOptions::default(), move |_| {
            release_handle.update(|c| c.global_pointer_up());
        });

        let resize_handle = new_handle.clone();
        let resize_canvas = canvas.clone();
        let resize = gloo::events::EventListener::new(&gloo::utils::window(), "resize", move |_| {
            let width = resize_canvas.client_width().max(1) as u32;
            let height = resize_canvas.client_height().max(1) as u32;
            if width == resize_canvas.width() && height == resize_canvas.height() {
                return;
            }
            resize_canvas.set_width(width);
            resize_canvas.set_height(height);
            resize_handle.update(|c| c.resize(width as f64, height as f64));
        });

        on_cleanup(move || {
            wheel.remove();
            if let Some(release) = release {
                release.remove();
            }
            drop(resize);
        });

        let load_handle = new_handle.clone();
        let base_url = config.api_base_url.clone();
        spawn_local(async move {
            match ChainDataClient::new(base_url).load_dataset().await {
                Ok(dataset) => {
                    ui.status.set(LoadStatus::Ready { days: dataset.day_count(), blocks: dataset.block_count() });
                    let dataset = Rc::new(dataset);
                    load_handle.update(|c| c.set_dataset(dataset));
                    ui.publish(&load_handle);
                }
                Err(e) => {
                    log_error!(LogComponent::Presentation("HeatmapCanvas"), "Load failed: {}", e);
                    ui.status.set(LoadStatus::Failed(e.to_string()));
                }
            }
        });

        handle.set_value(Some(new_handle));
        true
    });

    // Display options from the sidebar.
    create_effect(move |_| {
        let field = ui.field.get();
        let kind = ui.scale_kind.get();
        with_handle(&|h| {
            h.update(|c| {
                let field_changed = c.set_color_field(field);
                let kind_changed = c.set_scale_kind(kind);
                field_changed || kind_changed
            });
            ui.publish(h);
        });
    });

    view! {
        <div class="heatmap-wrapper">
            <canvas
                id="heatmap-canvas"
                node_ref=canvas_ref
                on:mousedown=move |ev: web_sys::MouseEvent| {
                    with_handle(&|h| {
                        h.update(|c| c.pointer_down(ev.offset_x() as f64, ev.offset_y() as f64));
                    })
                }
                on:mousemove=move |ev: web_sys::MouseEvent| {
                    with_handle(&|h| {
                        h.update(|c| c.pointer_move(ev.offset_x() as f64, ev.offset_y() as f64));
                    })
                }
                on:mouseup=move |_| with_handle(&|h| {
                    h.update(|c| c.pointer_up());
                })
                on:mouseleave=move |_| with_handle(&|h| {
                    h.update(|c| c.pointer_leave());
                })
            />
        </div>
    }
}
