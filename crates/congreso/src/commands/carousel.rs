//! `congreso carousel simulate`: drive the carousel state machine from the
//! command line and print the state after every step.

use serde::Serialize;
use tabled::Tabled;

use congreso_core::{Carousel, CarouselOptions, ItemsPerView};

use crate::cli::{CarouselArgs, CarouselCommand, SimulateArgs, Step};
use crate::error::CliError;
use crate::output;

use super::Ctx;

/// Carousel state after one step.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct StepState {
    #[tabled(rename = "#")]
    pub step: usize,
    #[tabled(rename = "Event")]
    pub event: String,
    #[tabled(rename = "Index")]
    pub index: usize,
    #[tabled(rename = "Page")]
    pub page: usize,
    #[tabled(rename = "Pages")]
    pub pages: usize,
    #[tabled(rename = "Per view")]
    pub per_view: usize,
    #[tabled(rename = "Offset %")]
    pub offset_percent: f64,
    #[tabled(rename = "Visible")]
    pub visible: String,
    #[tabled(rename = "Note")]
    pub note: String,
}

impl StepState {
    fn capture<T>(step: usize, event: String, carousel: &Carousel<T>, note: &str) -> Self {
        let range = carousel.visible_range();
        Self {
            step,
            event,
            index: carousel.current_index(),
            page: carousel.active_page(),
            pages: carousel.total_pages(),
            per_view: carousel.items_per_view(),
            offset_percent: carousel.offset_percent(),
            visible: if range.is_empty() {
                String::from("-")
            } else {
                format!("{}..{}", range.start, range.end)
            },
            note: note.to_owned(),
        }
    }
}

/// Build the carousel the arguments describe.
pub fn build(args: &SimulateArgs, ctx: &Ctx<'_>) -> Result<Carousel<usize>, CliError> {
    let items_per_view = match (args.per_view, args.mobile, args.tablet, args.desktop) {
        (Some(n), ..) => ItemsPerView::Fixed(n),
        (None, Some(m), Some(t), Some(d)) => ItemsPerView::responsive(m, t, d),
        _ => ItemsPerView::default(),
    };
    let options = CarouselOptions {
        items_per_view,
        breakpoints: ctx.config.carousel.breakpoints()?,
        infinite_loop: args.infinite_loop,
        autoplay: args.steps.iter().any(|s| matches!(s, Step::Tick)),
        interval: ctx.config.carousel.autoplay_interval(),
        ..CarouselOptions::default()
    };
    Ok(Carousel::with_width(
        (0..args.items).collect(),
        options,
        args.width,
    ))
}

/// Apply `steps` in order, recording the initial state as step 0.
pub fn simulate<T>(carousel: &mut Carousel<T>, steps: &[Step]) -> Vec<StepState> {
    let mut states = Vec::with_capacity(steps.len() + 1);
    states.push(StepState::capture(0, "start".into(), carousel, ""));

    for (i, step) in steps.iter().enumerate() {
        let note = match *step {
            Step::Next => {
                carousel.next();
                ""
            }
            Step::Prev => {
                carousel.prev();
                ""
            }
            Step::Page(page) => match carousel.go_to_page(page) {
                Ok(()) => "",
                Err(_) => "page out of range",
            },
            Step::Resize(px) => {
                if carousel.resize(px) {
                    "per-view changed"
                } else {
                    ""
                }
            }
            Step::Tick => {
                if carousel.autoplay_tick() {
                    ""
                } else {
                    "paused"
                }
            }
            Step::Enter => {
                carousel.pointer_enter();
                ""
            }
            Step::Leave => {
                carousel.pointer_leave();
                ""
            }
        };
        states.push(StepState::capture(i + 1, step.to_string(), carousel, note));
    }
    states
}

pub fn handle(args: CarouselArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    match args.command {
        CarouselCommand::Simulate(sim) => {
            let mut carousel = build(&sim, ctx)?;
            tracing::debug!(
                items = carousel.len(),
                per_view = carousel.items_per_view(),
                mode = ?carousel.mode(),
                "simulating carousel"
            );
            let states = simulate(&mut carousel, &sim.steps);
            let rendered = output::render_list(
                ctx.format,
                &states,
                StepState::clone,
                |s| format!("{} {} {}", s.event, s.index, s.page),
            )?;
            ctx.print(&rendered);
            Ok(())
        }
    }
}
