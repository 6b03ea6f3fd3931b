use std::cell::Cell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use carousel_scrollbar::{
    Carousel, CarouselEvent, EventBus, InputKind, NavigationRequest, PageInfo, Part,
    PointerEvent, PointerPhase, Renderer, ScrollbarOptions, ScrollbarPlugin, ScrollbarType,
    StyleProperty, StyleSurface, Target, TargetId,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseEventKind};
use crossterm::{cursor, execute, queue, style, terminal};
use log::{debug, info, trace};
use simplelog::{Config, LevelFilter, WriteLogger};

const ITEMS: usize = 24;
const PAGE: usize = 4;
const TRACK_X: u16 = 2;
const TRACK_ROW: u16 = 5;
const HANDLE: Target = Target {
    id: TargetId(1),
    control: None,
};

/// Carousel whose items are numbered cells on one row.
struct DemoCarousel {
    index: Cell<usize>,
}

impl DemoCarousel {
    fn step(&self, forward: bool) {
        let last = ITEMS - PAGE;
        let index = self.index.get();
        let next = if forward {
            (index + 1).min(last)
        } else {
            index.saturating_sub(1)
        };
        self.index.set(next);
    }
}

impl Carousel for DemoCarousel {
    fn current_index(&self) -> usize {
        self.index.get()
    }

    fn animation_speed(&self) -> Duration {
        Duration::from_millis(250)
    }
}

/// Renders the scrollbar as a row of terminal cells.
#[derive(Default)]
struct TerminalRenderer {
    track_width: f32,
    handle_width: f32,
    offsets: HashMap<Part, f32>,
    sizes: HashMap<Part, f32>,
    styles: HashMap<(Part, StyleProperty), String>,
    dragged: bool,
    disabled: bool,
    captured: Option<InputKind>,
}

impl TerminalRenderer {
    fn new(track_width: f32) -> Self {
        Self {
            track_width,
            handle_width: 2.0,
            ..Default::default()
        }
    }

    fn offset(&self, part: Part) -> f32 {
        self.offsets.get(&part).copied().unwrap_or(0.0)
    }

    fn size(&self, part: Part) -> f32 {
        self.sizes.get(&part).copied().unwrap_or(0.0)
    }

    fn handle_span(&self) -> (u16, u16) {
        let start = TRACK_X + self.offset(Part::Handle).round() as u16;
        let width = match self.sizes.get(&Part::Handle) {
            Some(px) => px.round().max(1.0) as u16,
            None => self.handle_width as u16,
        };
        (start, start + width)
    }

    fn hits_handle(&self, column: u16, row: u16) -> bool {
        let (start, end) = self.handle_span();
        row == TRACK_ROW && column >= start && column < end
    }

    fn draw(&self, out: &mut impl Write, host: &DemoCarousel) -> io::Result<()> {
        queue!(out, terminal::Clear(terminal::ClearType::All))?;

        let index = host.current_index();
        let mut row = String::new();
        for item in index..(index + PAGE).min(ITEMS) {
            row.push_str(&format!("[ {:>2} ]", item));
        }
        queue!(out, cursor::MoveTo(TRACK_X, 2), style::Print(row))?;

        let track = self.track_width as usize;
        let progress = self.size(Part::Progress).round() as usize;
        let mut cells: Vec<char> = (0..track)
            .map(|cell| if cell < progress { '▒' } else { '─' })
            .collect();
        if !self.disabled {
            let (start, end) = self.handle_span();
            let glyph = if self.dragged { '▓' } else { '█' };
            for column in start..end {
                if let Some(cell) = cells.get_mut(usize::from(column - TRACK_X)) {
                    *cell = glyph;
                }
            }
        }
        let track: String = cells.into_iter().collect();
        queue!(out, cursor::MoveTo(TRACK_X, TRACK_ROW), style::Print(track))?;

        queue!(
            out,
            cursor::MoveTo(TRACK_X, TRACK_ROW + 2),
            style::Print("drag the handle, ←/→ to navigate, q to quit")
        )?;
        out.flush()
    }
}

impl StyleSurface for TerminalRenderer {
    fn is_attached(&self, _part: Part) -> bool {
        true
    }

    fn style(&self, part: Part, property: StyleProperty) -> Option<String> {
        self.styles.get(&(part, property)).cloned()
    }

    fn set_style(&mut self, part: Part, property: StyleProperty, value: Option<String>) {
        match value {
            Some(value) => self.styles.insert((part, property), value),
            None => self.styles.remove(&(part, property)),
        };
    }
}

impl Renderer for TerminalRenderer {
    fn measure(&self, part: Part) -> Option<f32> {
        match part {
            Part::Track => Some(self.track_width),
            Part::Handle => Some(self.handle_width),
            Part::Progress => Some(self.size(Part::Progress)),
        }
    }

    fn set_offset(&mut self, part: Part, px: f32) {
        self.offsets.insert(part, px);
    }

    fn set_size(&mut self, part: Part, px: f32) {
        self.sizes.insert(part, px);
    }

    fn set_transition(&mut self, part: Part, duration: Option<Duration>) {
        // Cells jump; transitions are only logged.
        trace!("{:?} transition {:?}", part, duration);
    }

    fn set_dragged(&mut self, dragged: bool) {
        self.dragged = dragged;
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn capture_pointer(&mut self, input: InputKind) {
        self.captured = Some(input);
    }

    fn release_pointer(&mut self, _input: InputKind) {
        self.captured = None;
    }
}

fn track_width(columns: u16) -> f32 {
    f32::from(columns.saturating_sub(TRACK_X * 2).max(1))
}

fn main() -> io::Result<()> {
    let log_file = File::create("scrollbar.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let kind = match std::env::args().nth(1).as_deref() {
        Some("progress") => ScrollbarType::Progress,
        _ => ScrollbarType::Scroll,
    };

    let host = Rc::new(DemoCarousel {
        index: Cell::new(0),
    });
    let events = EventBus::new();
    let navigation = EventBus::new();

    let follower = host.clone();
    let _navigation = navigation.subscribe(move |request: &NavigationRequest| {
        debug!("Carousel moving to {}", request.index);
        follower.index.set(request.index);
    });

    let (columns, _) = terminal::size()?;
    let mut plugin = ScrollbarPlugin::attach(
        ScrollbarOptions::new().scrollbar_type(kind),
        host.clone(),
        TerminalRenderer::new(track_width(columns)),
        &events,
        navigation,
    )
    .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let page = PageInfo::new(ITEMS, PAGE);
    events.publish(&CarouselEvent::Initialized(page));
    info!("Demo started in {:?} mode", kind);

    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )?;

    let result = run(&mut out, &mut plugin, &host, &events, page);

    execute!(
        out,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;
    plugin.destroy();
    result
}

fn run(
    out: &mut impl Write,
    plugin: &mut ScrollbarPlugin<TerminalRenderer>,
    host: &DemoCarousel,
    events: &EventBus<CarouselEvent>,
    page: PageInfo,
) -> io::Result<()> {
    let mut pressed_on_handle = false;

    loop {
        if let Some(renderer) = plugin.controller().renderer() {
            renderer.draw(out, host)?;
        }

        // One turn: everything already queued.
        let mut batch = vec![event::read()?];
        while event::poll(Duration::ZERO)? {
            batch.push(event::read()?);
        }

        for raw in batch {
            match raw {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Left | KeyCode::Right => {
                        host.step(key.code == KeyCode::Right);
                        events.publish(&CarouselEvent::Translate);
                    }
                    _ => {}
                },
                Event::Resize(columns, _) => {
                    if let Some(renderer) = plugin.controller_mut().renderer_mut() {
                        renderer.track_width = track_width(columns);
                    }
                    events.publish(&CarouselEvent::Resized(page));
                }
                Event::Mouse(mouse) => {
                    let on_handle = plugin
                        .controller()
                        .renderer()
                        .is_some_and(|r| r.hits_handle(mouse.column, mouse.row));
                    if matches!(mouse.kind, MouseEventKind::Down(_)) {
                        pressed_on_handle = on_handle;
                        if !on_handle {
                            continue;
                        }
                    }

                    let Some(pointer) = PointerEvent::from_mouse(&mouse, HANDLE) else {
                        continue;
                    };
                    plugin.pointer(&pointer);

                    // Terminals report no clicks; a press and release on the
                    // handle stands in for one.
                    if pointer.phase == PointerPhase::Up && pressed_on_handle && on_handle {
                        plugin.click(HANDLE.id);
                    }
                    if pointer.phase == PointerPhase::Up {
                        pressed_on_handle = false;
                    }
                }
                _ => {}
            }
        }

        plugin.end_turn();
    }
}
