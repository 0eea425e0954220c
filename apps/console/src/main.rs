mod commands;
mod views;

use std::path::PathBuf;

use adopta_config::load as load_config;
use adopta_pets::{CatalogView, NewPet, Sex};
use adopta_router::{
    guard_route, nav_links, on_logo_click, on_logout, on_search_change, GuardDecision, Navigation,
    NavigationMode, Route,
};
use adopta_runtime::{shutdown_signal, telemetry, AppServices};
use adopta_users::{ProfileUpdate, RegisterRequest, Role, Subscription, Upload};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tracing::info;

use crate::commands::{ConsoleCommand, HELP};

#[derive(Parser)]
#[command(name = "adopta")]
#[command(about = "Adopta client (console by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the session restored from the service
    Whoami,
    /// Print the adoption wall once
    Wall {
        /// Species filter
        #[arg(long, default_value = "")]
        search: String,
        /// Show every match instead of the preview
        #[arg(long)]
        all: bool,
    },
    /// Start interactive console (default)
    Console,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;
    let services = AppServices::initialise(&config)
        .await
        .context("failed to initialise client services")?;

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Whoami => {
            views::print_session(&services.session.snapshot());
            Ok(())
        }
        Commands::Wall { search, all } => {
            let load = services.pets.list_pets().await;
            let view = CatalogView::build(&load, &search, all, config.catalog.preview_limit);
            views::print_catalog(&view);
            Ok(())
        }
        Commands::Console => run_console(services).await,
    }
}

async fn run_console(services: AppServices) -> anyhow::Result<()> {
    info!("starting interactive console");

    println!("Adopta un Amigo");
    println!("Type commands like '/help', '/login', '/wall', '/search perro', '/quit'");
    println!("Use Ctrl+C or '/quit' to exit");
    println!("---");

    let mut console = Console::new(services);
    console.open(Route::Home).await;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        print!("{}> ", console.current);
        std::io::Write::flush(&mut std::io::stdout())?;

        let line = tokio::select! {
            line = console.read_line() => line?,
            _ = &mut shutdown => break,
        };
        let Some(line) = line else {
            break; // EOF
        };

        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        match ConsoleCommand::parse(command) {
            Ok(ConsoleCommand::Quit) => {
                println!("Goodbye!");
                break;
            }
            Ok(command) => console.handle(command).await?,
            Err(error) => println!("{error}"),
        }
    }

    Ok(())
}

struct Console {
    services: AppServices,
    reader: BufReader<Stdin>,
    current: Route,
    show_all: bool,
    _session_events: Subscription,
}

impl Console {
    fn new(services: AppServices) -> Self {
        let session_events = services.session.subscribe(|session| match &session.user {
            Some(user) if session.is_authenticated => info!(username = %user.username, "session changed"),
            _ => info!("session changed: signed out"),
        });

        Self {
            services,
            reader: BufReader::new(tokio::io::stdin()),
            current: Route::Home,
            show_all: false,
            _session_events: session_events,
        }
    }

    async fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let bytes_read = self.reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn prompt(&mut self, label: &str) -> anyhow::Result<String> {
        print!("  {label}: ");
        std::io::Write::flush(&mut std::io::stdout())?;
        Ok(self.read_line().await?.unwrap_or_default())
    }

    async fn handle(&mut self, command: ConsoleCommand) -> anyhow::Result<()> {
        match command {
            ConsoleCommand::Help => println!("{HELP}"),
            ConsoleCommand::Quit => {}
            ConsoleCommand::Login { username, password } => {
                match self.services.session.login(&username, &password).await {
                    Ok(identity) => {
                        println!("Bienvenido, {}", identity.username);
                        self.navigate(Navigation::push(Route::Wall)).await;
                    }
                    Err(error) => println!("Error: {}", error.message()),
                }
            }
            ConsoleCommand::Register => self.register().await?,
            ConsoleCommand::Logout => {
                let navigation = on_logout(&self.services.session).await;
                println!("Sesión cerrada");
                self.navigate(navigation).await;
            }
            ConsoleCommand::Whoami => views::print_session(&self.services.session.snapshot()),
            ConsoleCommand::Search(term) => {
                let navigation = on_search_change(&self.services.search, term);
                self.navigate(navigation).await;
            }
            ConsoleCommand::Home => {
                let navigation = on_logo_click(&self.services.search);
                self.navigate(navigation).await;
            }
            ConsoleCommand::Wall { all } => {
                self.show_all = all;
                self.open(Route::Wall).await;
            }
            ConsoleCommand::Pet(id) => {
                self.open(Route::PetDetail(id)).await;
            }
            ConsoleCommand::Adopt(id) => self.adopt(id).await,
            ConsoleCommand::Publish => {
                if self.open(Route::Publish).await {
                    self.publish().await?;
                }
            }
            ConsoleCommand::Mine => {
                self.open(Route::MyPets).await;
            }
            ConsoleCommand::Admin => {
                self.open(Route::AdminDashboard).await;
            }
            ConsoleCommand::Delete(id) => {
                let session = self.services.session.snapshot();
                match self.services.pets.delete_pet(&session, id).await {
                    Ok(()) => println!("Mascota #{id} eliminada"),
                    Err(error) => println!("Error: {}", error.message()),
                }
            }
            ConsoleCommand::Profile => {
                self.open(Route::Profile).await;
            }
            ConsoleCommand::EditProfile => {
                if self.open(Route::Profile).await {
                    self.edit_profile().await?;
                }
            }
            ConsoleCommand::Open(path) => match Route::parse(&path) {
                Ok(route) => {
                    self.open(route).await;
                }
                Err(error) => println!("{error}"),
            },
            ConsoleCommand::Nav => views::print_nav(&nav_links(&self.services.session.snapshot())),
        }
        Ok(())
    }

    async fn navigate(&mut self, navigation: Navigation) {
        if navigation.mode == NavigationMode::Replace {
            println!("-> {} (replaced)", navigation.target);
        }
        self.open(navigation.target).await;
    }

    /// Run the guard for `route` and render whatever it allows. Returns true
    /// when `route` itself was rendered.
    async fn open(&mut self, route: Route) -> bool {
        let login_redirect = self.services.login_redirect;
        let mut decision = guard_route(route, &self.services.session.snapshot(), login_redirect);
        if decision == GuardDecision::Pending {
            let session = self.services.session.wait_until_loaded().await;
            decision = guard_route(route, &session, login_redirect);
        }

        match decision {
            GuardDecision::Render => {
                self.render(route).await;
                true
            }
            GuardDecision::Redirect(navigation) => {
                println!("-> {} (replaced)", navigation.target);
                self.render(navigation.target).await;
                false
            }
            GuardDecision::Pending => false,
        }
    }

    async fn render(&mut self, route: Route) {
        self.current = route;
        if route.shows_navbar() {
            views::print_nav(&nav_links(&self.services.session.snapshot()));
        }
        println!("== {} ==", route.title());

        match route {
            Route::Home => println!("Encuentra a tu nuevo mejor amigo: /wall"),
            Route::Login => println!("Inicia sesión con /login <user> <password>"),
            Route::Register => println!("Crea tu cuenta con /register o inicia sesión con /login"),
            Route::Wall | Route::PetList => {
                let show_all = route == Route::PetList || self.show_all;
                let term = self.services.search.term();
                if !term.is_empty() {
                    println!("Búsqueda: \"{term}\"");
                }
                let load = self.services.pets.list_pets().await;
                let view = CatalogView::build(
                    &load,
                    &term,
                    show_all,
                    self.services.config.catalog.preview_limit,
                );
                views::print_catalog(&view);
            }
            Route::Publish => println!("Completa el formulario para publicar una mascota"),
            Route::PetDetail(id) => match self.services.pets.get_pet(id).await {
                Ok(pet) => {
                    let adopted = self.services.session.adopted_pets().contains(&id);
                    views::print_detail(&pet, adopted);
                }
                Err(error) => println!("Mascota no encontrada: {}", error.message()),
            },
            Route::Profile => match self.services.api.get_profile().await {
                Ok(profile) => views::print_profile(&profile),
                Err(error) => println!("Error: {error}"),
            },
            Route::MyPets => {
                let Some(user) = self.services.session.current_user() else {
                    return;
                };
                match self.services.pets.my_pets(&user).await {
                    Ok(pets) if pets.is_empty() => println!("Aún no has publicado mascotas"),
                    Ok(pets) => pets.iter().for_each(views::print_card),
                    Err(error) => println!("Error: {}", error.message()),
                }
            }
            Route::AdminDashboard => match self.services.pets.list_pets().await {
                Ok(pets) => views::print_admin_table(&pets),
                Err(error) => println!("Error: {}", error.message()),
            },
        }
    }

    async fn adopt(&mut self, id: i64) {
        let session = self.services.session.snapshot();
        if !session.is_authenticated {
            self.navigate(Navigation::push(Route::Login)).await;
            return;
        }
        if !session.can_adopt() {
            println!("Solo las cuentas de adoptante pueden adoptar");
            return;
        }

        if self.services.session.adopt(id) {
            println!("¡Gracias! Nos pondremos en contacto contigo para la adopción de #{id}");
            self.navigate(Navigation::push(Route::Wall)).await;
        } else {
            println!("Ya has solicitado adoptar a #{id}");
        }
    }

    async fn register(&mut self) -> anyhow::Result<()> {
        let username = self.prompt("Usuario").await?;
        let email = self.prompt("Correo").await?;
        let password = self.prompt("Contraseña").await?;
        let password_confirm = self.prompt("Confirmar contraseña").await?;
        let role_input = self.prompt("Rol (adoptante/publicador)").await?;

        let role = if role_input.trim().is_empty() {
            Role::Adopter
        } else {
            match role_input.trim().parse::<Role>() {
                Ok(role) => role,
                Err(error) => {
                    println!("Error: {error}");
                    return Ok(());
                }
            }
        };

        let request = RegisterRequest {
            username,
            email,
            password,
            password_confirm,
            role,
        };
        if let Err(error) = request.validate() {
            println!("Error: {error}");
            return Ok(());
        }

        match self.services.session.register(&request).await {
            Ok(identity) => {
                println!("Cuenta creada. Bienvenido, {}", identity.username);
                self.navigate(Navigation::push(Route::Wall)).await;
            }
            Err(error) => println!("Error: {}", error.message()),
        }
        Ok(())
    }

    async fn publish(&mut self) -> anyhow::Result<()> {
        let name = self.prompt("Nombre").await?;
        let age = self.prompt("Edad en meses").await?;
        let description = self.prompt("Descripción").await?;
        let vaccinated = self.prompt("¿Vacunado? (s/n)").await?;
        let sex = self.prompt("Sexo (macho/hembra)").await?;
        let location = self.prompt("Ubicación (id)").await?;
        let species = self.prompt("Especie (id)").await?;
        let image = self.prompt("Imagen (ruta, opcional)").await?;
        let Some(image) = attach(&image).await else {
            return Ok(());
        };

        let form = NewPet {
            name,
            age_months: age.trim().parse().unwrap_or(0),
            description,
            vaccinated: matches!(vaccinated.trim(), "s" | "si" | "sí" | "y" | "yes"),
            sex: sex.parse().unwrap_or(Sex::Macho),
            location_id: location.trim().parse().ok(),
            species_id: species.trim().parse().ok(),
            image,
        };

        match self.services.pets.publish(form).await {
            Ok(pet) => {
                println!("Mascota publicada: #{} {}", pet.id, pet.name);
                self.open(Route::PetDetail(pet.id)).await;
            }
            Err(error) => println!("Error: {}", error.message()),
        }
        Ok(())
    }

    async fn edit_profile(&mut self) -> anyhow::Result<()> {
        let current = match self.services.api.get_profile().await {
            Ok(profile) => profile,
            Err(error) => {
                println!("Error: {error}");
                return Ok(());
            }
        };
        let mut update = ProfileUpdate::from_profile(&current);

        let email = self.prompt(&format!("Correo [{}]", current.email)).await?;
        if !email.trim().is_empty() {
            update.email = Some(email.trim().to_string());
        }
        let bio = self.prompt("Biografía (vacío para mantener)").await?;
        if !bio.is_empty() {
            update.bio = Some(bio);
        }
        let password = self.prompt("Nueva contraseña (vacío para mantener)").await?;
        update.password = Some(password);
        let avatar = self.prompt("Avatar (ruta, opcional)").await?;
        let Some(avatar) = attach(&avatar).await else {
            return Ok(());
        };
        update.avatar = avatar;

        match self.services.api.update_profile(&update).await {
            Ok(profile) => {
                println!("Perfil actualizado");
                views::print_profile(&profile);
            }
            Err(error) => println!("Error: {error}"),
        }
        Ok(())
    }
}

/// `Some(None)` for an empty path, `None` when the file could not be read.
async fn attach(path: &str) -> Option<Option<Upload>> {
    match read_upload(path).await {
        Ok(upload) => Some(upload),
        Err(error) => {
            println!("Error: {error:#}");
            None
        }
    }
}

async fn read_upload(path: &str) -> anyhow::Result<Option<Upload>> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    let path = PathBuf::from(path);
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Some(Upload::new(file_name, bytes)))
}
