use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::models::Project;

/// Category tabs, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryTab {
    Comercial,
    Secreto,
    Publico,
    Todos,
}

impl CategoryTab {
    pub const ALL: [CategoryTab; 4] = [
        CategoryTab::Comercial,
        CategoryTab::Secreto,
        CategoryTab::Publico,
        CategoryTab::Todos,
    ];

    /// Value sent as `tipo`
    pub fn query_value(self) -> &'static str {
        match self {
            CategoryTab::Comercial => "comercial",
            CategoryTab::Secreto => "secreto",
            CategoryTab::Publico => "publico",
            CategoryTab::Todos => "todos",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryTab::Comercial => "Comercial",
            CategoryTab::Secreto => "Secreto",
            CategoryTab::Publico => "Público",
            CategoryTab::Todos => "Todos",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CategoryTab::Comercial => "Projetos Comerciais",
            CategoryTab::Secreto => "Projetos Secretos",
            CategoryTab::Publico => "Projetos Públicos",
            CategoryTab::Todos => "Todos os Projetos",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Tag colour for a project's category
pub fn category_color(category: &str) -> Color {
    match category {
        "comercial" => Color::Rgb(0x2E, 0x8B, 0x57),
        "secreto" => Color::Rgb(0xB2, 0x22, 0x22),
        "publico" => Color::Rgb(0x1E, 0x90, 0xFF),
        _ => Color::Rgb(0x66, 0x66, 0x66),
    }
}

// Represents the state of the catalog screen
pub struct CatalogState {
    tab: CategoryTab,
    projects: Vec<Project>,
    list_state: ListState,
    search: String,
    searching: bool,
    connection_error: Option<String>,
}

pub enum CatalogAction {
    Quit,
    LoadCategory(CategoryTab),
    Search(String),
    NewProject,
}

impl CatalogState {
    pub fn new(tab: CategoryTab) -> Self {
        Self {
            tab,
            projects: Vec::new(),
            list_state: ListState::default(),
            search: String::new(),
            searching: false,
            connection_error: None,
        }
    }

    pub fn tab(&self) -> CategoryTab {
        self.tab
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.list_state
            .select(if projects.is_empty() { None } else { Some(0) });
        self.projects = projects;
    }

    pub fn set_connection_error(&mut self, error: Option<String>) {
        self.connection_error = error;
    }

    pub fn connection_error(&self) -> Option<&str> {
        self.connection_error.as_deref()
    }

    pub fn select_tab(&mut self, tab: CategoryTab) {
        self.tab = tab;
        self.search.clear();
        self.searching = false;
    }

    pub fn next(&mut self) {
        if self.projects.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.projects.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.projects.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => self.projects.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.list_state.selected().and_then(|i| self.projects.get(i))
    }

    // A blank term falls back to the current tab instead of searching everything.
    fn search_action(&self) -> CatalogAction {
        if self.search.trim().is_empty() {
            CatalogAction::LoadCategory(self.tab)
        } else {
            CatalogAction::Search(self.search.clone())
        }
    }
}

pub fn render_catalog<B: Backend>(frame: &mut Frame<B>, state: &mut CatalogState) {
    let size = frame.size();
    let banner_height = if state.connection_error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(banner_height),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(size);

    if let Some(error) = &state.connection_error {
        let banner = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::White).bg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title("Sem conexão"));
        frame.render_widget(banner, chunks[0]);
    }

    let titles = CategoryTab::ALL
        .iter()
        .map(|tab| Spans::from(Span::raw(tab.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .block(Block::default().borders(Borders::ALL).title("Wayne Industries"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[1]);

    let search_style = if state.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if state.searching { "|" } else { "" };
    let search = Paragraph::new(format!("{}{}", state.search, cursor))
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title("Pesquisa"));
    frame.render_widget(search, chunks[2]);

    render_project_list(frame, state, chunks[3]);

    let buttons = Paragraph::new(footer_text(state))
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[4]);
}

/// Key help, followed by the highlighted project's id and access level
fn footer_text(state: &CatalogState) -> String {
    if state.searching {
        return "Digite para pesquisar | <Enter>/<Esc> Sair da pesquisa".to_string();
    }

    let help = "<Tab>/<←→> Categoria | </> Pesquisar | <N> Novo projeto | <R> Recarregar | <Q> Sair";
    match state.selected_project() {
        Some(project) => format!("#{} {} | {}", project.id, project.access_level, help),
        None => help.to_string(),
    }
}

fn render_project_list<B: Backend>(frame: &mut Frame<B>, state: &mut CatalogState, area: Rect) {
    let title = if state.search.trim().is_empty() {
        state.tab.title().to_string()
    } else {
        format!("Resultados para \"{}\"", state.search.trim())
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    if state.projects.is_empty() {
        let empty = Paragraph::new("Nenhum projeto encontrado.")
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .projects
        .iter()
        .map(|project| {
            ListItem::new(vec![
                Spans::from(Span::styled(
                    project.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(Span::raw(project.description.clone())),
                Spans::from(vec![
                    Span::styled(
                        format!(" {} ", project.category.to_uppercase()),
                        Style::default()
                            .fg(Color::White)
                            .bg(category_color(&project.category)),
                    ),
                    Span::raw(format!("  Acesso: {}", project.access_level)),
                ]),
                Spans::from(""),
            ])
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(list, area, &mut state.list_state);
}

pub fn handle_key(state: &mut CatalogState, key: KeyCode) -> Option<CatalogAction> {
    if state.searching {
        match key {
            KeyCode::Char(c) => {
                state.search.push(c);
                return Some(state.search_action());
            }
            KeyCode::Backspace => {
                state.search.pop();
                return Some(state.search_action());
            }
            KeyCode::Enter | KeyCode::Esc => {
                state.searching = false;
            }
            KeyCode::Down => state.next(),
            KeyCode::Up => state.previous(),
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(CatalogAction::Quit),
        KeyCode::Char('/') => state.searching = true,
        KeyCode::Char('n') => return Some(CatalogAction::NewProject),
        KeyCode::Char('r') => return Some(state.search_action()),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            state.select_tab(CategoryTab::ALL[index]);
            return Some(CatalogAction::LoadCategory(state.tab));
        }
        KeyCode::Tab | KeyCode::Right => {
            state.select_tab(state.tab.next());
            return Some(CatalogAction::LoadCategory(state.tab));
        }
        KeyCode::BackTab | KeyCode::Left => {
            state.select_tab(state.tab.previous());
            return Some(CatalogAction::LoadCategory(state.tab));
        }
        KeyCode::Down => state.next(),
        KeyCode::Up => state.previous(),
        _ => {}
    }
    None
}

pub fn handle_input(state: &mut CatalogState) -> Result<Option<CatalogAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}
