//! Resets and seeds the spots table with the well-known fixture locations.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use server::database::{clear_spots, init_postgres, insert_spot};
use spots::{Category, NewSpot};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Keep existing spots instead of clearing the table first.
    #[arg(long)]
    keep: bool,
}

fn fixtures() -> Vec<NewSpot> {
    [
        (
            "Eiffel Tower",
            "Iconic iron tower in Paris, France",
            48.8584,
            2.2945,
            "France",
            "Paris",
            Category::Landmarks,
        ),
        (
            "Grand Canyon",
            "Massive canyon in Arizona, USA",
            36.1064,
            -112.1129,
            "United States",
            "Arizona",
            Category::Nature,
        ),
        (
            "Bondi Beach",
            "Famous beach in Sydney, Australia",
            -33.8915,
            151.2767,
            "Australia",
            "Sydney",
            Category::Beach,
        ),
        (
            "Taj Mahal",
            "White marble mausoleum in Agra, India",
            27.1751,
            78.0421,
            "India",
            "Agra",
            Category::Landmarks,
        ),
        (
            "Mount Everest",
            "Highest peak in the world",
            27.9881,
            86.925,
            "Nepal",
            "Khumbu",
            Category::Nature,
        ),
    ]
    .into_iter()
    .map(
        |(name, description, latitude, longitude, country, city, category)| NewSpot {
            name: name.to_string(),
            description: description.to_string(),
            latitude,
            longitude,
            country: country.to_string(),
            city: city.to_string(),
            category,
        },
    )
    .collect()
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost:5432/spots".to_string());
    let pool = init_postgres(&database_url).await;

    if !args.keep {
        let cleared = clear_spots(&pool).await.unwrap();
        println!("Cleared existing spots: {cleared}");
    }

    let fixtures = fixtures();

    let pb = ProgressBar::new(fixtures.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    for spot in &fixtures {
        pb.set_message(format!("Seeding {}", spot.name));
        insert_spot(&pool, spot).await.unwrap();
        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!("\nSeeded spots: {}", fixtures.len());
}

#[cfg(test)]
mod tests {
    use super::fixtures;

    #[test]
    fn test_fixtures_pass_validation() {
        let fixtures = fixtures();

        assert_eq!(fixtures.len(), 5);
        for spot in &fixtures {
            assert_eq!(spot.validate(), Ok(()), "{} should be valid", spot.name);
        }
    }

    #[test]
    fn test_fixture_coordinates() {
        let fixtures = fixtures();

        assert_eq!(fixtures[0].name, "Eiffel Tower");
        assert_eq!(
            (fixtures[0].latitude, fixtures[0].longitude),
            (48.8584, 2.2945)
        );
        assert_eq!(
            (fixtures[3].latitude, fixtures[3].longitude),
            (27.1751, 78.0421)
        );
    }
}
