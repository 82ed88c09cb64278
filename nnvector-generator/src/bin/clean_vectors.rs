use std::fs;

use nnvector_generator::vectors::vector_dir;

fn main() {
    let out_dir = vector_dir();
    if !out_dir.exists() {
        println!("clean-vectors: no vectors to clean");
        return;
    }
    if let Err(err) = fs::remove_dir_all(&out_dir) {
        eprintln!("clean_vectors: failed to remove {}: {err}", out_dir.display());
        std::process::exit(1);
    }
    println!("clean-vectors: removed {}", out_dir.display());
}
