use chrono::Local;
use chrono::Utc;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use ratatui::layout::Position;
use ratatui::layout::Rect;

use crate::aggregate::DashboardView;
use crate::aggregate::GaugeScope;
use crate::aggregate::ViewState;
use crate::event::DevEvent;
use crate::fetch::EventStore;
use crate::fetch::FetchResult;
use crate::fetch::Fetcher;
use crate::fetch::StoreId;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    Projects,
    Stats,
}

impl View {
    pub fn label(self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Projects => "Projects",
            View::Stats => "Stats",
        }
    }

    fn next(self) -> Self {
        match self {
            View::Overview => View::Projects,
            View::Projects => View::Stats,
            View::Stats => View::Overview,
        }
    }

    fn store_id(self) -> StoreId {
        match self {
            View::Overview => StoreId::Overview,
            View::Projects => StoreId::Projects,
            View::Stats => StoreId::Stats,
        }
    }
}

pub struct App {
    pub view: View,
    pub state: ViewState,
    pub search_editing: bool,
    pub profile_open: bool,
    pub project_filter: Option<String>,
    pub table_scroll: usize,
    pub should_quit: bool,
    overview_store: EventStore,
    projects_store: EventStore,
    stats_store: EventStore,
    fetcher: Fetcher,
}

impl App {
    pub fn new(fetcher: Fetcher) -> Self {
        App {
            view: View::Overview,
            state: ViewState::default(),
            search_editing: false,
            profile_open: false,
            project_filter: None,
            table_scroll: 0,
            should_quit: false,
            overview_store: EventStore::default(),
            projects_store: EventStore::default(),
            stats_store: EventStore::default(),
            fetcher,
        }
    }

    pub fn activate(&mut self) {
        self.ensure_fetched(self.view);
    }

    pub fn store(&self, view: View) -> &EventStore {
        match view {
            View::Overview => &self.overview_store,
            View::Projects => &self.projects_store,
            View::Stats => &self.stats_store,
        }
    }

    fn store_mut(&mut self, store: StoreId) -> &mut EventStore {
        match store {
            StoreId::Overview => &mut self.overview_store,
            StoreId::Projects => &mut self.projects_store,
            StoreId::Stats => &mut self.stats_store,
        }
    }

    /// The overview screen's view model, rebuilt from scratch on every draw.
    pub fn dashboard(&self) -> DashboardView<'_> {
        DashboardView::build(self.overview_store.events(), &self.state, Utc::now(), &Local)
    }

    /// Events shown by the project table, narrowed by the exact-name filter.
    pub fn project_events(&self) -> Vec<&DevEvent> {
        self.projects_store
            .events()
            .iter()
            .filter(|event| match &self.project_filter {
                None => true,
                Some(name) => event.project_name.as_deref() == Some(name.as_str()),
            })
            .collect()
    }

    pub fn on_fetch_result(&mut self, result: FetchResult) {
        self.store_mut(result.store).apply(result.generation, result.result);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.profile_open {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('o')) {
                self.profile_open = false;
            }
            return;
        }
        if self.search_editing {
            self.edit_search(key.code);
            return;
        }
        match key.code {
            KeyCode::Char('q' | 'Q') => self.should_quit = true,
            KeyCode::Tab => self.select_view(self.view.next()),
            KeyCode::Char('1') => self.select_view(View::Overview),
            KeyCode::Char('2') => self.select_view(View::Projects),
            KeyCode::Char('3') => self.select_view(View::Stats),
            KeyCode::Char('o') => self.profile_open = true,
            KeyCode::Char('r') => self.refresh(self.view),
            KeyCode::Char('t') if self.view == View::Overview => {
                self.state.time_range = self.state.time_range.next();
                self.refresh(View::Overview);
            }
            KeyCode::Char('g') if self.view == View::Overview => self.cycle_gauge_scope(),
            KeyCode::Char('/') if self.view == View::Overview => self.search_editing = true,
            KeyCode::Char('f') if self.view == View::Projects => self.cycle_project_filter(),
            KeyCode::Up => self.table_scroll = self.table_scroll.saturating_sub(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.table_scroll = self.table_scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::Home => self.table_scroll = 0,
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        // the profile menu is click-outside-to-close
        if self.profile_open
            && let MouseEventKind::Down(MouseButton::Left) = mouse.kind
        {
            let menu = ui::profile_menu_area(area);
            if !menu.contains(Position::new(mouse.column, mouse.row)) {
                self.profile_open = false;
            }
        }
    }

    fn edit_search(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.search_editing = false,
            KeyCode::Esc => {
                self.search_editing = false;
                self.state.search_query.clear();
            }
            KeyCode::Backspace => {
                self.state.search_query.pop();
            }
            KeyCode::Char(c) => self.state.search_query.push(c),
            _ => {}
        }
    }

    fn select_view(&mut self, view: View) {
        self.view = view;
        self.table_scroll = 0;
        self.ensure_fetched(view);
    }

    fn ensure_fetched(&mut self, view: View) {
        if !self.store(view).fetched() {
            self.refresh(view);
        }
    }

    fn refresh(&mut self, view: View) {
        // only the overview narrows the query by time range, the other views
        // always fetch the full collection
        let range = if view == View::Overview {
            Some(self.state.time_range)
        } else {
            None
        };
        let store = view.store_id();
        let generation = self.store_mut(store).begin();
        self.fetcher.request(store, generation, range);
    }

    fn cycle_gauge_scope(&mut self) {
        let options: Vec<GaugeScope> = {
            let view = self.dashboard();
            let mut options = vec![GaugeScope::All];
            options.extend(
                view.project_stats
                    .iter()
                    .map(|stat| GaugeScope::Project(stat.project.clone())),
            );
            options
        };
        let current = options.iter().position(|option| *option == self.state.gauge_scope).unwrap_or(0);
        self.state.gauge_scope = options[(current + 1) % options.len()].clone();
    }

    fn cycle_project_filter(&mut self) {
        let mut projects: Vec<String> = Vec::new();
        for event in self.projects_store.events() {
            if let Some(name) = event.project_name.as_deref()
                && !projects.iter().any(|known| known == name)
            {
                projects.push(name.to_string());
            }
        }
        self.project_filter = match self.project_filter.take() {
            None => projects.first().cloned(),
            Some(current) => {
                let index = projects.iter().position(|name| *name == current);
                match index {
                    Some(index) if index + 1 < projects.len() => Some(projects[index + 1].clone()),
                    _ => None,
                }
            }
        };
        self.table_scroll = 0;
    }

    fn scroll_down(&mut self, step: usize) {
        let rows = match self.view {
            View::Projects => self.project_events().len(),
            _ => 0,
        };
        self.table_scroll = (self.table_scroll + step).min(rows.saturating_sub(1));
    }
}
