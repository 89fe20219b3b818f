use std::{env, error::Error};

use clap::Parser;
use rusqlite::Connection;
use time::Duration;

use expense_tracker::{Error as AppError, User, create_token, create_user, get_user, initialize_db};

const MAX_TOKEN_HOURS: i64 = 24 * 366;

/// A utility for registering a user with the expense tracker and issuing them a bearer token.
///
/// The token is signed with the secret in the `JWT_SECRET` environment variable,
/// which must match the secret given to the server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database, created if it does not exist.
    #[arg(long)]
    db_path: String,

    /// The unique name of the user.
    #[arg(long)]
    username: String,

    /// The user's first name.
    #[arg(long)]
    first_name: String,

    /// The user's last name.
    #[arg(long)]
    last_name: String,

    /// The user's email address.
    #[arg(long)]
    email: String,

    /// How many hours the token is valid for, at most one year.
    #[arg(
        long,
        default_value_t = 24,
        value_parser = clap::value_parser!(i64).range(1..=MAX_TOKEN_HOURS),
    )]
    token_hours: i64,
}

/// Register a user if they do not exist yet and print a bearer token for them.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let secret = env::var("JWT_SECRET")
        .map_err(|_| "The environment variable 'JWT_SECRET' must be set")?;

    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;

    match get_user(&args.username, &conn) {
        Ok(user) => eprintln!("User {} already exists, issuing a new token.", user.username),
        Err(AppError::UserNotFound(_)) => {
            let user = User {
                username: args.username.clone(),
                first_name: args.first_name,
                last_name: args.last_name,
                email: args.email,
            };
            create_user(&user, &conn)?;
            eprintln!("Created user {}.", user.username);
        }
        Err(error) => return Err(error.into()),
    }

    let token = create_token(&args.username, &secret, Duration::hours(args.token_hours))?;
    println!("{token}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Args, MAX_TOKEN_HOURS};

    fn parse(token_hours: Option<&str>) -> Result<Args, clap::Error> {
        let mut args = vec![
            "create_user",
            "--db-path",
            "test.db",
            "--username",
            "alice",
            "--first-name",
            "Alice",
            "--last-name",
            "Test",
            "--email",
            "alice@example.com",
        ];
        if let Some(token_hours) = token_hours {
            args.extend(["--token-hours", token_hours]);
        }

        Args::try_parse_from(args)
    }

    #[test]
    fn token_hours_defaults_to_one_day() {
        assert_eq!(parse(None).unwrap().token_hours, 24);
    }

    #[test]
    fn token_hours_accepts_upper_bound() {
        let max = MAX_TOKEN_HOURS.to_string();

        assert_eq!(parse(Some(&max)).unwrap().token_hours, MAX_TOKEN_HOURS);
    }

    #[test]
    fn token_hours_out_of_range_is_rejected() {
        for token_hours in ["0", "-1", "9223372036854775807"] {
            assert!(parse(Some(token_hours)).is_err(), "accepted {token_hours}");
        }
    }
}
