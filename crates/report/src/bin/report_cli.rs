use std::env;
use std::fs::File;
use std::io::{self, BufReader};

use report::{ParsedReportSummary, parse_report_from_reader};

fn main() {
    let mut json = false;
    let mut path = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ if path.is_none() => path = Some(arg),
            _ => {
                eprintln!("usage: report_cli [--json] <path|->");
                std::process::exit(2);
            }
        }
    }
    let Some(path) = path else {
        eprintln!("usage: report_cli [--json] <path|->");
        std::process::exit(2);
    };

    let summary = if path == "-" {
        parse_report_from_reader(io::stdin().lock())
    } else {
        let file = File::open(&path).unwrap_or_else(|err| {
            eprintln!("failed to open {}: {}", path, err);
            std::process::exit(1);
        });
        parse_report_from_reader(BufReader::new(file))
    };

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("failed to serialize summary: {}", err);
                std::process::exit(1);
            }
        }
    } else {
        print_fields(&summary);
    }
}

fn print_fields(summary: &ParsedReportSummary) {
    let fields = [
        ("title", &summary.title),
        ("total_xp_today", &summary.total_xp_today),
        ("mood", &summary.mood),
        ("health", &summary.health),
        ("code", &summary.code),
        ("overall", &summary.overall),
        ("level", &summary.level),
        ("total_xp_ever", &summary.total_xp_ever),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            println!("{name} {value}");
        }
    }
    for entry in summary.xp_breakdown.iter().flatten() {
        println!("xp {} {}", entry.category, entry.xp);
    }
}
