use anyhow::{Context, Result};
use colored::*;
use reqwest::Client;
use serde_json::Value;
use std::io::{self, Write};

const DEFAULT_API_URL: &str = "http://localhost:3001";

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🔧 Fleet Maintenance Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FLEET_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let client = Client::new();

    check_health(&client, &base_url).await?;

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚚 Listar vehículos");
        println!("2. 🔧 Vencimientos próximos");
        println!("3. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-3): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        match choice.trim() {
            "1" => list_vehicles(&client, &base_url).await?,
            "2" => {
                let days = prompt("Días de horizonte [30]: ")?;
                let days = if days.is_empty() { "30".to_string() } else { days };
                list_due(&client, &base_url, &days).await?;
            }
            "3" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red()),
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

async fn fetch(client: &Client, url: &str) -> Result<Value> {
    println!("{} {}", "📤 GET".bright_blue(), url);
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("No se pudo conectar con {}", url))?;
    let status = response.status();
    let body: Value = response.json().await.context("Respuesta no es JSON")?;
    if !status.is_success() {
        println!("{} {}", "❌ HTTP".bright_red(), status);
        println!("{}", serde_json::to_string_pretty(&body)?);
    }
    Ok(body)
}

async fn check_health(client: &Client, base_url: &str) -> Result<()> {
    let body = fetch(client, &format!("{}/health", base_url)).await?;
    if body["status"] == "ok" {
        println!("{}", "✅ API disponible".bright_green().bold());
    } else {
        println!("{}", "⚠️ Health check inesperado".bright_yellow());
    }
    Ok(())
}

/// Colorear los días restantes como en el panel: rojo vencido, naranja pronto
fn paint_days(days: &Value) -> ColoredString {
    match days.as_i64() {
        Some(d) if d < 0 => d.to_string().bright_red().bold(),
        Some(d) if d < 30 => d.to_string().yellow(),
        Some(d) => d.to_string().green(),
        None => "-".dimmed(),
    }
}

async fn list_vehicles(client: &Client, base_url: &str) -> Result<()> {
    let body = fetch(client, &format!("{}/api/vehicles", base_url)).await?;
    let vehicles = body["data"].as_array().cloned().unwrap_or_default();
    println!("{} {}", "📦 Vehículos:".bright_cyan().bold(), vehicles.len());

    for vehicle in &vehicles {
        println!(
            "  {} [{}] filtro {} | inspección {} | fuga mangueras {}",
            vehicle["name"].as_str().unwrap_or("?").bold(),
            vehicle["license_plate"].as_str().unwrap_or("?"),
            paint_days(&vehicle["days_to_filter_replacement"]),
            paint_days(&vehicle["days_to_annual_inspection"]),
            paint_days(&vehicle["days_to_hose_leak_test"]),
        );
    }
    Ok(())
}

async fn list_due(client: &Client, base_url: &str, days: &str) -> Result<()> {
    let url = format!("{}/api/vehicles/maintenance/due?within_days={}", base_url, days);
    let body = fetch(client, &url).await?;
    let summaries = body["data"].as_array().cloned().unwrap_or_default();
    println!("{} {}", "🔧 Vehículos con tareas pendientes:".bright_cyan().bold(), summaries.len());

    for summary in &summaries {
        println!(
            "  {} [{}]",
            summary["name"].as_str().unwrap_or("?").bold(),
            summary["license_plate"].as_str().unwrap_or("?")
        );
        for item in summary["items"].as_array().into_iter().flatten() {
            println!(
                "     {} {} ({})",
                item["category"].as_str().unwrap_or("?"),
                paint_days(&item["days_remaining"]),
                item["due_date"].as_str().unwrap_or("?")
            );
        }
    }
    Ok(())
}
