use crate::config::Property;
use colored::*;
use tabled::{
    settings::{object::Rows, Color, Modify, Style},
    Table, Tabled,
};

pub fn format_header(text: &str) -> String {
    format!("{}", text.blue().bold())
}

pub fn format_highlight(text: &str) -> String {
    format!("{}", text.cyan())
}

pub fn format_success(text: &str) -> String {
    format!("{}", text.green())
}

pub fn format_warning(text: &str) -> String {
    format!("{}", text.yellow())
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Active")]
    active: String,
}

#[derive(Tabled)]
struct PropertyRow<'a> {
    #[tabled(rename = "Property")]
    property: &'a str,
    #[tabled(rename = "Value")]
    value: String,
}

fn styled(mut table: Table, header: Color) -> String {
    table
        .with(Style::blank())
        .with(Modify::new(Rows::first()).with(header))
        .with(
            Modify::new(Rows::first())
                .with(tabled::settings::Format::content(|s| s.bold().to_string())),
        );
    table.to_string()
}

pub fn profiles_table<'a>(names: impl Iterator<Item = &'a str>, active: &str) -> String {
    let rows: Vec<_> = names
        .map(|name| ProfileRow {
            name: format_highlight(name),
            active: if name == active {
                format_success("*")
            } else {
                String::new()
            },
        })
        .collect();
    styled(Table::new(rows), Color::FG_GREEN)
}

/// Secret values are masked except for their last four characters.
pub fn properties_table<'a>(
    values: impl Iterator<Item = (Property, Option<&'a str>)>,
) -> String {
    let rows: Vec<_> = values
        .filter_map(|(property, value)| {
            value.map(|v| PropertyRow {
                property: property.name(),
                value: if property.is_secret() {
                    mask(v)
                } else {
                    v.to_string()
                },
            })
        })
        .collect();
    styled(Table::new(rows), Color::FG_CYAN)
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
