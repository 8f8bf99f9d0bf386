use clap::{Parser, Subcommand};
use coursehub_cli::accounts::{self, NewAccount};
use coursehub_cli::seeder::{self, SeedConfig};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "coursehub-cli")]
#[command(about = "Coursehub CLI - Administrative tools for Coursehub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Mark the account as staff (sees every course)
        #[arg(long)]
        staff: bool,

        /// Add the account to the moderators role
        #[arg(long)]
        moderator: bool,
    },
    /// Seed the database with fake users, courses, lessons and subscriptions
    Seed {
        /// Number of regular users to create
        #[arg(short = 'u', long, default_value = "10")]
        users: usize,

        /// Number of moderators to create
        #[arg(short = 'm', long, default_value = "1")]
        moderators: usize,

        /// Number of courses per regular user
        #[arg(long, default_value = "2")]
        courses_per_user: usize,

        /// Number of lessons per course
        #[arg(long, default_value = "5")]
        lessons_per_course: usize,

        /// Number of subscriptions per regular user
        #[arg(long, default_value = "3")]
        subscriptions_per_user: usize,
    },
    /// Remove seeded users and everything they own
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateUser {
            first_name,
            last_name,
            email,
            password,
            staff,
            moderator,
        } => {
            let account = NewAccount {
                first_name: prompt_if_missing(first_name, "First name"),
                last_name: prompt_if_missing(last_name, "Last name"),
                email: prompt_if_missing(email, "Email address"),
                password: password.unwrap_or_else(|| {
                    Password::new()
                        .with_prompt("Password")
                        .with_confirmation("Confirm password", "Passwords don't match")
                        .interact()
                        .expect("Failed to read password")
                }),
                staff,
                moderator,
            };
            handle_create_user(&pool, account).await
        }
        Commands::Seed {
            users,
            moderators,
            courses_per_user,
            lessons_per_course,
            subscriptions_per_user,
        } => {
            let config = SeedConfig::new(users)
                .with_moderators(moderators)
                .with_courses(courses_per_user, lessons_per_course)
                .with_subscriptions(subscriptions_per_user);
            handle_seed(&pool, config).await
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> String {
    value.unwrap_or_else(|| {
        Input::new()
            .with_prompt(prompt)
            .interact_text()
            .unwrap_or_else(|e| {
                eprintln!("❌ Failed to read {}: {}", prompt.to_lowercase(), e);
                std::process::exit(1);
            })
    })
}

async fn handle_create_user(pool: &sqlx::postgres::PgPool, account: NewAccount) {
    match accounts::create_user(pool, &account).await {
        Ok(id) => {
            println!("\n✅ User created successfully!");
            println!("   Id: {}", id);
            println!("   Email: {}", account.email);
            println!("   Name: {} {}", account.first_name, account.last_name);
            if account.staff {
                println!("   Staff: yes");
            }
            if account.moderator {
                println!("   Role: moderators");
            }
        }
        Err(e) => {
            eprintln!("\n❌ Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &sqlx::postgres::PgPool, config: SeedConfig) {
    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &sqlx::postgres::PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
