use lyricline_genius::{extract_lyrics, remove_section_headers};

/// Song page with `verses` lyrics containers, each carrying a header widget and annotations.
fn synthetic_page(verses: usize) -> String {
    let mut html = String::from("<html><body><div class=\"SongHeader\">Title</div>");
    for v in 0..verses {
        html.push_str("<div data-lyrics-container=\"true\" class=\"Lyrics__Container\">");
        html.push_str("<div data-exclude-from-selection=\"true\"><div>12 Contributors</div></div>");
        html.push_str(&format!("[Verse {v}]<br/>"));
        for line in 0..8 {
            html.push_str(&format!(
                "Line {line} of verse {v} with <a href=\"/{line}\"><span>an annotation</span></a> &amp; more<br/>"
            ));
        }
        html.push_str("</div><div class=\"Ad\">ad</div>");
    }
    html.push_str("</body></html>");
    html
}

fn load_page() -> String {
    match std::env::var("BENCH_DATA_DIR") {
        Ok(dir) => {
            let path = std::path::Path::new(&dir).join("song_page.html");
            std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
        }
        Err(_) => synthetic_page(6),
    }
}

#[divan::bench]
fn extract(bencher: divan::Bencher) {
    let page = load_page();
    bencher.bench(|| extract_lyrics(divan::black_box(&page)));
}

#[divan::bench]
fn extract_and_strip_headers(bencher: divan::Bencher) {
    let page = load_page();
    bencher.bench(|| extract_lyrics(divan::black_box(&page)).map(|l| remove_section_headers(&l)));
}

fn main() {
    divan::main();
}
