//! quranomind - interactive tafsir lookup console.
//!
//! Menu loop over the core library: view a verse's tafsir, search the
//! local tafsir corpus for a keyword, manage favorites, and repair
//! malformed corpus files. Data directory comes from `QURANOMIND_DATA`
//! or defaults to `./data`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use quranomind_core::{
    repair, AddOutcome, CorpusPaths, CorpusStore, FavoriteRecord, FavoritesStore, LookupOptions,
    LookupService, RemoveOutcome, SurahTable,
};

fn main() {
    tracing_subscriber::fmt::init();

    let base_dir = std::env::var("QURANOMIND_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    let paths = CorpusPaths::new(&base_dir);

    let table = SurahTable::load(&paths.surahs_file);
    let favorites = FavoritesStore::new(&paths.favorites_file);
    let store = CorpusStore::new(paths);
    let service = LookupService::new(table, store, favorites);

    println!("quranomind — tafsir lookup (data: {})", base_dir.display());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!(
            "\n[1] view tafsir  [2] search  [3] favorites  [4] repair file  [0] quit\n> "
        );
        let _ = io::stdout().flush();
        let Some(Ok(choice)) = lines.next() else { break };

        match choice.trim() {
            "1" => view_tafsir(&service, &mut lines),
            "2" => search(&service, &mut lines),
            "3" => favorites_menu(&service, &mut lines),
            "4" => repair_file(&mut lines),
            "0" => break,
            "" => {}
            other => println!("unknown choice: {other}"),
        }
    }
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, label: &str) -> Option<String> {
    print!("{label}: ");
    let _ = io::stdout().flush();
    lines.next()?.ok().map(|line| line.trim().to_string())
}

fn view_tafsir(service: &LookupService, lines: &mut impl Iterator<Item = io::Result<String>>) {
    let Some(surah) = prompt(lines, "surah number or name") else { return };
    let Some(ayah) = prompt(lines, "ayah number") else { return };
    let Ok(ayah) = ayah.parse::<u32>() else {
        println!("ayah must be a number");
        return;
    };

    match service.lookup(&surah, ayah, &LookupOptions::default()) {
        Ok(response) => {
            println!(
                "\n[{}] {} — ayah {}",
                response.surah_id, response.surah_name, response.ayah_number
            );
            if let Some(verse) = &response.verse_text {
                println!("{verse}");
            }
            match &response.tafsir {
                Some(tafsir) => println!("\n{tafsir}"),
                None => println!("\nno tafsir available for this ayah"),
            }
            if response.is_favorite {
                println!("(already in favorites)");
            }
            for warning in &response.warnings {
                println!("note: {warning}");
            }
        }
        Err(err) => println!("{err}"),
    }
}

fn search(service: &LookupService, lines: &mut impl Iterator<Item = io::Result<String>>) {
    let Some(query) = prompt(lines, "keyword") else { return };
    let results = service.search(&query);
    if results.is_empty() {
        println!("no matches in the local tafsir corpus");
        return;
    }

    println!("{} match(es):", results.len());
    for result in &results {
        println!(
            "\n[{}] {} — ayah {}",
            result.surah_id, result.surah_name, result.ayah_number
        );
        if let Some(verse) = &result.verse_text {
            println!("{verse}");
        }
        println!("{}", result.tafsir_text);
    }

    if let Some(answer) = prompt(lines, "add first result to favorites? (y/n)") {
        if answer.eq_ignore_ascii_case("y") {
            let record = FavoriteRecord::from_result(&results[0], "arabic", "maissar");
            match service.favorites().add(record) {
                Ok(AddOutcome::Added) => println!("added"),
                Ok(AddOutcome::AlreadyExists) => println!("already in favorites"),
                Err(err) => println!("could not save favorites: {err}"),
            }
        }
    }
}

fn favorites_menu(service: &LookupService, lines: &mut impl Iterator<Item = io::Result<String>>) {
    let favorites = service.favorites().list();
    if favorites.is_empty() {
        println!("no favorites yet");
        return;
    }

    for (index, fav) in favorites.iter().enumerate() {
        println!(
            "[{}] {} ({}) — ayah {} ({})",
            index + 1,
            fav.surah_name,
            fav.surah_number,
            fav.ayah_number,
            fav.timestamp.format("%Y-%m-%d")
        );
    }

    if let Some(answer) = prompt(lines, "number to remove (blank to keep all)") {
        if answer.is_empty() {
            return;
        }
        let Ok(index) = answer.parse::<usize>() else {
            println!("not a number");
            return;
        };
        let Some(fav) = favorites.get(index.wrapping_sub(1)) else {
            println!("no such entry");
            return;
        };
        match service.favorites().remove(&fav.hash) {
            Ok(RemoveOutcome::Removed) => println!("removed"),
            Ok(RemoveOutcome::NotFound) => println!("already gone"),
            Err(err) => println!("could not save favorites: {err}"),
        }
    }
}

fn repair_file(lines: &mut impl Iterator<Item = io::Result<String>>) {
    let Some(path) = prompt(lines, "corpus file path") else { return };
    if path.is_empty() {
        return;
    }
    match repair::repair_corpus_file(&path) {
        Ok(outcome) => println!("{outcome:?}"),
        Err(err) => println!("repair failed: {err}"),
    }
}
