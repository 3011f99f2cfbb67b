use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use project_catalog::api::{self, AppState as ApiState};
use project_catalog::client::CatalogClient;
use project_catalog::config::{self, Config};
use project_catalog::db;
use project_catalog::telemetry::{self, LogSink};
use project_catalog::ui::{
    catalog::{handle_input as handle_catalog_input, render_catalog, CatalogAction, CatalogState, CategoryTab},
    project_wizard::{
        handle_input as handle_project_wizard_input, render_project_wizard, ProjectWizardAction,
        ProjectWizardState,
    },
};

const CONNECTION_ERROR: &str = "Erro de conexão com o servidor. Verifique se a API está rodando.";

#[derive(Parser)]
#[command(name = "project-catalog", version, about = "Wayne Industries project catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize the store and serve the JSON API (default)
    Serve {
        /// Listen address, overrides BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Create and seed the store, then exit
    Init,
    /// Browse the catalog in the terminal
    Browse {
        /// API base URL, overrides API_URL
        #[arg(long)]
        api_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init()?;

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            telemetry::init(&config, LogSink::Stderr)?;
            let bind_addr = bind.unwrap_or_else(|| config.bind_addr.clone());

            let db = db::init(&config).await?;
            api::serve(ApiState::new(db), &bind_addr).await
        }
        Command::Init => {
            telemetry::init(&config, LogSink::Stderr)?;
            let db = db::Database::new(&config).await?;
            let seeded = db.initialize().await?;
            let total = db.count_projects().await?;
            println!("Seeded {} projects ({} in store)", seeded, total);
            Ok(())
        }
        Command::Browse { api_url } => {
            telemetry::init(&config, LogSink::File)?;
            let api_url = api_url.unwrap_or_else(|| config.api_url.clone());
            browse(&config, CatalogClient::new(api_url)).await
        }
    }
}

// Represents the current screen in the browser
enum AppScreen {
    Catalog,
    ProjectWizard,
}

// Main browser state
struct AppState {
    client: CatalogClient,
    screen: AppScreen,
    catalog_state: CatalogState,
    project_wizard_state: Option<ProjectWizardState>,
}

impl AppState {
    fn new(client: CatalogClient) -> Self {
        Self {
            client,
            screen: AppScreen::Catalog,
            catalog_state: CatalogState::new(CategoryTab::Comercial),
            project_wizard_state: None,
        }
    }
}

async fn browse(config: &Config, client: CatalogClient) -> Result<()> {
    tracing::info!(api_url = client.base_url(), log_file = %config.log_file, "starting catalog browser");

    let mut app_state = AppState::new(client);
    connect(&mut app_state).await;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app_state).await;

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        println!("Error: {}", err);
    }

    result
}

/// Check the API and load the first tab; a failed check only shows a banner.
async fn connect(app_state: &mut AppState) {
    let status = app_state.client.check_status().await;
    if status.is_online() {
        tracing::info!(total = ?status.total_projects, "connected to catalog api");
        app_state.catalog_state.set_connection_error(None);
    } else {
        tracing::error!(error = ?status.error, "catalog api unavailable");
        app_state
            .catalog_state
            .set_connection_error(Some(CONNECTION_ERROR.to_string()));
    }

    let tab = app_state.catalog_state.tab();
    load_category(app_state, tab).await;
}

async fn load_category(app_state: &mut AppState, tab: CategoryTab) {
    let projects = app_state.client.load_projects(tab.query_value()).await;
    app_state.catalog_state.set_projects(projects);
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| match app_state.screen {
            AppScreen::Catalog => render_catalog(f, &mut app_state.catalog_state),
            AppScreen::ProjectWizard => {
                if let Some(state) = &mut app_state.project_wizard_state {
                    render_project_wizard(f, state);
                }
            }
        })?;

        let should_quit = match app_state.screen {
            AppScreen::Catalog => handle_catalog_screen(app_state).await?,
            AppScreen::ProjectWizard => handle_project_wizard_screen(app_state).await?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

async fn handle_catalog_screen(app_state: &mut AppState) -> Result<bool> {
    match handle_catalog_input(&mut app_state.catalog_state)? {
        Some(CatalogAction::Quit) => return Ok(true),
        Some(CatalogAction::LoadCategory(tab)) => {
            if app_state.catalog_state.connection_error().is_some() {
                connect(app_state).await;
            } else {
                load_category(app_state, tab).await;
            }
        }
        Some(CatalogAction::Search(term)) => {
            let projects = app_state.client.search_projects(&term).await;
            app_state.catalog_state.set_projects(projects);
        }
        Some(CatalogAction::NewProject) => {
            let category = app_state.catalog_state.tab().query_value();
            app_state.project_wizard_state = Some(ProjectWizardState::new(category));
            app_state.screen = AppScreen::ProjectWizard;
        }
        None => {}
    }

    Ok(false)
}

async fn handle_project_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.project_wizard_state {
        match handle_project_wizard_input(state)? {
            Some(ProjectWizardAction::Cancel) => {
                app_state.project_wizard_state = None;
                app_state.screen = AppScreen::Catalog;
            }
            Some(ProjectWizardAction::Save(project)) => {
                let outcome = app_state.client.save_project(&project).await;
                if outcome.success {
                    app_state.project_wizard_state = None;
                    app_state.screen = AppScreen::Catalog;

                    let tab = app_state.catalog_state.tab();
                    load_category(app_state, tab).await;
                } else {
                    state.error = outcome.error;
                }
            }
            None => {}
        }
    }

    Ok(false)
}
