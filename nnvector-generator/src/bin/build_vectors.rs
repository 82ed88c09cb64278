use std::io::{self, Write};

use nnvector::specs::catalog;
use nnvector_generator::listing::write_listing;
use nnvector_generator::vectors::{vector_dir, write_case};

fn main() {
    let out_dir = vector_dir();
    let listing_dir = out_dir.join("listings");
    let entries = catalog();
    let total = entries.len();
    for (idx, entry) in entries.iter().enumerate() {
        let line = format!("[{}/{}] -- generating vectors for {}", idx + 1, total, entry.name);
        print!("\r{:<80}", line);
        let _ = io::stdout().flush();
        let case = match (entry.build)() {
            Ok(case) => case,
            Err(err) => {
                eprintln!("\nbuild_vectors: failed to build {}: {err}", entry.name);
                std::process::exit(1);
            }
        };
        if let Err(err) = write_case(&out_dir, &case) {
            eprintln!("\nbuild_vectors: failed to write {}: {err}", entry.name);
            std::process::exit(1);
        }
        if let Err(err) = write_listing(&listing_dir, &case) {
            eprintln!("\nbuild_vectors: failed to write listing for {}: {err}", entry.name);
            std::process::exit(1);
        }
    }
    println!();
    nnvector::log!("build-vectors: wrote {total} cases to {}", out_dir.display());
}
