use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

use higherme_core::{ExerciseLogInput, MealLogInput, MoodLogInput, SleepLogInput, WaterLogInput};

#[derive(Debug, Clone, PartialEq)]
pub enum LogCommand {
    Mood(MoodLogInput),
    Meal(MealLogInput),
    Exercise(ExerciseLogInput),
    Sleep(SleepLogInput),
    Water(WaterLogInput),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login {
        email: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    Logout,
    Dashboard {
        json: bool,
    },
    Log(LogCommand),
    Code {
        create: bool,
    },
    Report {
        path: Option<String>,
        json: bool,
    },
    Progress {
        total_xp: u64,
        level: u32,
    },
    Help,
}

#[derive(Debug)]
pub struct CliArgs {
    pub backend_url: Option<String>,
    pub command: Command,
}

pub fn parse_args() -> Result<CliArgs, String> {
    parse_from(env::args().skip(1))
}

pub fn parse_from<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut backend_url = None;

    let command = loop {
        let Some(arg) = args.next() else {
            break Command::Help;
        };
        match arg.as_str() {
            "--backend-url" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --backend-url".to_string())?;
                backend_url = Some(value);
            }
            "--help" | "-h" | "help" => break Command::Help,
            _ => break parse_command(&arg, args.by_ref().collect())?,
        }
    };

    Ok(CliArgs {
        backend_url,
        command,
    })
}

fn parse_command(name: &str, rest: Vec<String>) -> Result<Command, String> {
    match name {
        "login" => {
            let [email, password] = positional::<2>(name, rest)?;
            Ok(Command::Login { email, password })
        }
        "register" => {
            let [username, email, password] = positional::<3>(name, rest)?;
            Ok(Command::Register {
                username,
                email,
                password,
            })
        }
        "logout" => {
            let [] = positional::<0>(name, rest)?;
            Ok(Command::Logout)
        }
        "dashboard" => {
            let (json, rest) = take_switch(rest, "--json");
            let [] = positional::<0>(name, rest)?;
            Ok(Command::Dashboard { json })
        }
        "code" => {
            let (create, rest) = take_switch(rest, "--create");
            let [] = positional::<0>(name, rest)?;
            Ok(Command::Code { create })
        }
        "report" => {
            let (json, mut rest) = take_switch(rest, "--json");
            if rest.len() > 1 {
                return Err("report takes at most one path".to_string());
            }
            Ok(Command::Report {
                path: rest.pop(),
                json,
            })
        }
        "progress" => parse_progress(rest),
        "log" => parse_log(rest).map(Command::Log),
        _ => Err(format!("unknown command: {name}")),
    }
}

fn positional<const N: usize>(command: &str, rest: Vec<String>) -> Result<[String; N], String> {
    let count = rest.len();
    rest.try_into()
        .map_err(|_| format!("{command} expects {N} argument(s), got {count}"))
}

fn take_switch(rest: Vec<String>, switch: &str) -> (bool, Vec<String>) {
    let before = rest.len();
    let rest: Vec<String> = rest.into_iter().filter(|arg| arg != switch).collect();
    (rest.len() != before, rest)
}

fn parse_progress(rest: Vec<String>) -> Result<Command, String> {
    let mut iter = rest.into_iter();
    let total_xp = iter
        .next()
        .ok_or_else(|| "progress expects a total XP value".to_string())?;
    let total_xp = parse_number("total_xp", &total_xp)?;
    let mut flags = Flags::parse(iter.collect())?;
    let level = flags.optional("level")?.unwrap_or(1);
    flags.finish()?;
    Ok(Command::Progress { total_xp, level })
}

fn parse_log(rest: Vec<String>) -> Result<LogCommand, String> {
    let mut iter = rest.into_iter();
    let kind = iter
        .next()
        .ok_or_else(|| "log expects one of: mood, meal, exercise, sleep, water".to_string())?;
    let mut flags = Flags::parse(iter.collect())?;
    let command = match kind.as_str() {
        "mood" => LogCommand::Mood(MoodLogInput {
            mood_rating: flags.required("rating")?,
            energy_level: flags.required("energy")?,
            stress_level: flags.required("stress")?,
            notes: flags.optional("notes")?,
        }),
        "meal" => LogCommand::Meal(MealLogInput {
            calories: flags.required("calories")?,
            description: flags.required("description")?,
        }),
        "exercise" => LogCommand::Exercise(ExerciseLogInput {
            duration_minutes: flags.required("minutes")?,
            exercise_type: flags.required("type")?,
            intensity: flags.required("intensity")?,
        }),
        "sleep" => LogCommand::Sleep(SleepLogInput {
            hours: flags.required("hours")?,
            quality: flags.required("quality")?,
        }),
        "water" => LogCommand::Water(WaterLogInput {
            amount_ml: flags.required("ml")?,
        }),
        other => return Err(format!("unknown log type: {other}")),
    };
    flags.finish()?;
    Ok(command)
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("invalid {name} value: {value}"))
}

/// `--name value` pairs, consumed as the command reads them.
struct Flags(BTreeMap<String, String>);

impl Flags {
    fn parse(args: Vec<String>) -> Result<Self, String> {
        let mut flags = BTreeMap::new();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let name = arg
                .strip_prefix("--")
                .ok_or_else(|| format!("unexpected argument: {arg}"))?;
            let value = iter
                .next()
                .ok_or_else(|| format!("missing value for --{name}"))?;
            flags.insert(name.to_string(), value);
        }
        Ok(Self(flags))
    }

    fn optional<T: FromStr>(&mut self, name: &str) -> Result<Option<T>, String> {
        self.0
            .remove(name)
            .map(|value| parse_number(name, &value))
            .transpose()
    }

    fn required<T: FromStr>(&mut self, name: &str) -> Result<T, String> {
        self.optional(name)?
            .ok_or_else(|| format!("missing --{name}"))
    }

    fn finish(self) -> Result<(), String> {
        match self.0.keys().next() {
            Some(name) => Err(format!("unknown argument: --{name}")),
            None => Ok(()),
        }
    }
}

pub fn print_help() {
    println!(
        "HigherMe CLI\n\n\
Usage:\n  higherme [--backend-url <url>] <command>\n\n\
Commands:\n  \
login <email> <password>               Sign in and remember the session\n  \
register <username> <email> <password> Create an account and sign in\n  \
logout                                 Forget the stored session\n  \
dashboard [--json]                     Show level, XP and today's report\n  \
log mood --rating N --energy N --stress N [--notes TEXT]\n  \
log meal --calories N --description TEXT\n  \
log exercise --minutes N --type TEXT --intensity N\n  \
log sleep --hours H --quality N\n  \
log water --ml N\n  \
code [--create]                        Show or record coding activity\n  \
report [<path>|-] [--json]             Parse a daily report offline\n  \
progress <total_xp> [--level N]        Show level progress for a total\n\n\
Options:\n  --backend-url <url>  Override the configured backend for this run only\n  \
-h, --help           Show this help message\n"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, String> {
        parse_from(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn no_arguments_shows_help() {
        assert_eq!(parse(&[]).expect("args").command, Command::Help);
    }

    #[test]
    fn backend_url_precedes_command() {
        let args = parse(&["--backend-url", "http://api.test", "logout"]).expect("args");
        assert_eq!(args.backend_url.as_deref(), Some("http://api.test"));
        assert_eq!(args.command, Command::Logout);
    }

    #[test]
    fn login_needs_two_positionals() {
        let args = parse(&["login", "ada@example.com", "pw"]).expect("args");
        assert_eq!(
            args.command,
            Command::Login {
                email: "ada@example.com".to_string(),
                password: "pw".to_string(),
            }
        );
        let err = parse(&["login", "ada@example.com"]).expect_err("missing password");
        assert_eq!(err, "login expects 2 argument(s), got 1");
    }

    #[test]
    fn parses_mood_log() {
        let args = parse(&[
            "log", "mood", "--rating", "8", "--energy", "6", "--stress", "2", "--notes", "calm",
        ])
        .expect("args");
        assert_eq!(
            args.command,
            Command::Log(LogCommand::Mood(MoodLogInput {
                mood_rating: 8,
                energy_level: 6,
                stress_level: 2,
                notes: Some("calm".to_string()),
            }))
        );
    }

    #[test]
    fn log_rejects_missing_and_unknown_flags() {
        let err = parse(&["log", "water"]).expect_err("missing ml");
        assert_eq!(err, "missing --ml");
        let err = parse(&["log", "water", "--ml", "250", "--cups", "1"]).expect_err("unknown");
        assert_eq!(err, "unknown argument: --cups");
        let err = parse(&["log", "sleep", "--hours", "lots", "--quality", "5"])
            .expect_err("bad number");
        assert_eq!(err, "invalid hours value: lots");
    }

    #[test]
    fn report_reads_optional_path_and_json_switch() {
        let args = parse(&["report", "--json", "today.md"]).expect("args");
        assert_eq!(
            args.command,
            Command::Report {
                path: Some("today.md".to_string()),
                json: true,
            }
        );
        let args = parse(&["report"]).expect("args");
        assert_eq!(
            args.command,
            Command::Report {
                path: None,
                json: false,
            }
        );
    }

    #[test]
    fn progress_defaults_level() {
        let args = parse(&["progress", "250"]).expect("args");
        assert_eq!(
            args.command,
            Command::Progress {
                total_xp: 250,
                level: 1,
            }
        );
        let args = parse(&["progress", "712", "--level", "7"]).expect("args");
        assert_eq!(
            args.command,
            Command::Progress {
                total_xp: 712,
                level: 7,
            }
        );
    }

    #[test]
    fn unknown_command_is_an_error() {
        let err = parse(&["levelup"]).expect_err("unknown");
        assert_eq!(err, "unknown command: levelup");
    }
}
