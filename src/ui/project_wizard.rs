use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::NewProject;

const CATEGORIES: [&str; 3] = ["comercial", "secreto", "publico"];
const ACCESS_LEVELS: [&str; 3] = ["publico", "gerente", "administrador"];

pub enum ProjectWizardAction {
    Cancel,
    Save(NewProject),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum ProjectField {
    Name,
    Description,
    Category,
    AccessLevel,
}

pub struct ProjectWizardState {
    pub project: NewProject,
    pub current_field: ProjectField,
    pub editing: bool,
    /// Last save failure reported by the API
    pub error: Option<String>,
}

impl ProjectWizardState {
    pub fn new(category: &str) -> Self {
        let category = if CATEGORIES.contains(&category) {
            category
        } else {
            CATEGORIES[0]
        };

        Self {
            project: NewProject::new("", "", category, ACCESS_LEVELS[0]),
            current_field: ProjectField::Name,
            editing: false,
            error: None,
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            ProjectField::Name => ProjectField::Description,
            ProjectField::Description => ProjectField::Category,
            ProjectField::Category => ProjectField::AccessLevel,
            ProjectField::AccessLevel => ProjectField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            ProjectField::Name => ProjectField::AccessLevel,
            ProjectField::Description => ProjectField::Name,
            ProjectField::Category => ProjectField::Description,
            ProjectField::AccessLevel => ProjectField::Category,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            ProjectField::Name => edit_text(&mut self.project.name, key),
            ProjectField::Description => edit_text(&mut self.project.description, key),
            ProjectField::Category => cycle(&mut self.project.category, &CATEGORIES, key),
            ProjectField::AccessLevel => cycle(&mut self.project.access_level, &ACCESS_LEVELS, key),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.project.name.trim().is_empty() && !self.project.description.trim().is_empty()
    }
}

fn edit_text(value: &mut String, key: KeyCode) {
    match key {
        KeyCode::Char(c) => value.push(c),
        KeyCode::Backspace => {
            value.pop();
        }
        _ => {}
    }
}

fn cycle(value: &mut String, options: &[&str], key: KeyCode) {
    let current = options.iter().position(|o| *o == value.as_str()).unwrap_or(0);
    let next = match key {
        KeyCode::Right | KeyCode::Char(' ') => (current + 1) % options.len(),
        KeyCode::Left => (current + options.len() - 1) % options.len(),
        _ => return,
    };
    *value = options[next].to_string();
}

pub fn render_project_wizard<B: Backend>(f: &mut Frame<B>, state: &mut ProjectWizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("Novo Projeto")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_form(f, state, chunks[1]);

    let status = match &state.error {
        Some(error) => Paragraph::new(format!("Erro ao salvar: {}", error))
            .style(Style::default().fg(Color::Red)),
        None if !state.is_valid() => Paragraph::new("Nome e descrição são obrigatórios")
            .style(Style::default().fg(Color::Gray)),
        None => Paragraph::new("Pronto para salvar").style(Style::default().fg(Color::Green)),
    };
    f.render_widget(status.block(Block::default().borders(Borders::ALL)), chunks[2]);

    let help_text = if state.editing {
        match state.current_field {
            ProjectField::Name | ProjectField::Description => {
                "Enter - Save field | Esc - Cancel editing"
            }
            ProjectField::Category | ProjectField::AccessLevel => {
                "Left/Right - Change value | Enter - Save field | Esc - Cancel editing"
            }
        }
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save project | Esc - Cancel"
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

fn render_form<B: Backend>(f: &mut Frame<B>, state: &mut ProjectWizardState, area: Rect) {
    let fields = [
        (ProjectField::Name, "Nome", state.project.name.as_str()),
        (ProjectField::Description, "Descrição", state.project.description.as_str()),
        (ProjectField::Category, "Tipo", state.project.category.as_str()),
        (ProjectField::AccessLevel, "Nível de acesso", state.project.access_level.as_str()),
    ];

    let items: Vec<ListItem> = fields
        .iter()
        .map(|(field, name, value)| {
            let selected = *field == state.current_field;
            let content = if selected && state.editing {
                let displayed = match field {
                    ProjectField::Name | ProjectField::Description => format!("{}|", value),
                    ProjectField::Category | ProjectField::AccessLevel => format!("< {} >", value),
                };
                Spans::from(vec![
                    Span::styled(format!("{}: ", name), Style::default().fg(Color::Yellow)),
                    Span::styled(displayed, Style::default().add_modifier(Modifier::BOLD)),
                ])
            } else {
                let style = if selected {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                Spans::from(vec![
                    Span::styled(format!("{}: ", name), style),
                    Span::raw(value.to_string()),
                ])
            };

            ListItem::new(content)
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Detalhes do Projeto"))
        .highlight_style(Style::default().fg(Color::Yellow));

    f.render_widget(form_list, area);
}

pub fn handle_key(state: &mut ProjectWizardState, key: KeyCode) -> Option<ProjectWizardAction> {
    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Some(ProjectWizardAction::Cancel);
            }
        }
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => {
            if state.is_valid() {
                return Some(ProjectWizardAction::Save(state.project.clone()));
            }
        }
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    None
}

pub fn handle_input(state: &mut ProjectWizardState) -> Result<Option<ProjectWizardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(state: &mut ProjectWizardState, text: &str) {
        handle_key(state, KeyCode::Enter);
        for c in text.chars() {
            handle_key(state, KeyCode::Char(c));
        }
        handle_key(state, KeyCode::Enter);
    }

    #[test]
    fn save_requires_name_and_description() {
        let mut state = ProjectWizardState::new("secreto");
        assert!(handle_key(&mut state, KeyCode::Char('s')).is_none());

        type_text(&mut state, "Radar");
        handle_key(&mut state, KeyCode::Down);
        type_text(&mut state, "Sonar urbano");

        match handle_key(&mut state, KeyCode::Char('s')) {
            Some(ProjectWizardAction::Save(project)) => {
                assert_eq!(project.name, "Radar");
                assert_eq!(project.description, "Sonar urbano");
                assert_eq!(project.category, "secreto");
                assert_eq!(project.access_level, "publico");
            }
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn choice_fields_cycle_through_known_values() {
        let mut state = ProjectWizardState::new("todos");
        assert_eq!(state.project.category, "comercial");

        state.current_field = ProjectField::Category;
        handle_key(&mut state, KeyCode::Enter);
        handle_key(&mut state, KeyCode::Left);
        assert_eq!(state.project.category, "publico");
        handle_key(&mut state, KeyCode::Right);
        assert_eq!(state.project.category, "comercial");
        handle_key(&mut state, KeyCode::Enter);

        handle_key(&mut state, KeyCode::Down);
        handle_key(&mut state, KeyCode::Enter);
        handle_key(&mut state, KeyCode::Right);
        assert_eq!(state.project.access_level, "gerente");
    }

    #[test]
    fn escape_leaves_editing_before_cancelling() {
        let mut state = ProjectWizardState::new("publico");
        handle_key(&mut state, KeyCode::Enter);
        assert!(handle_key(&mut state, KeyCode::Esc).is_none());
        assert!(matches!(
            handle_key(&mut state, KeyCode::Esc),
            Some(ProjectWizardAction::Cancel)
        ));
    }
}
