use data_loader::RestaurantTable;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_file = Path::new("data/restaurants.dat");

    println!("Loading restaurant table...\n");

    let start = Instant::now();
    let table = RestaurantTable::load_from_file(data_file)
        .expect("Failed to load restaurants");
    let elapsed = start.elapsed();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Restaurants: {}", table.len());
    for (style, count) in table.style_counts() {
        println!("  {}: {}", style, count);
    }
    println!("\nPerformance: {:.0} records/second",
             table.len() as f64 / elapsed.as_secs_f64());
}
