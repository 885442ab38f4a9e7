use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

/// An archive shaped like a small episode: markers followed by level lumps
fn get_wad() -> wad_archive::Wad {
    let mut wad = wad_archive::Wad::new(wad_archive::WadKind::Internal);
    wad.add_lump(wad_archive::Lump::new("PLAYPAL", vec![0x40; 768 * 14]));
    for map in 1..=9 {
        wad.add_lump(wad_archive::Lump::new(format!("E1M{map}"), Vec::new()));
        for name in ["THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SEGS", "SECTORS"] {
            wad.add_lump(wad_archive::Lump::new(name, vec![map as u8; 4096]));
        }
    }
    wad
}

pub mod read {
    use divan::Bencher;
    use std::io::Cursor;

    #[divan::bench]
    fn read_archive(bencher: Bencher) {
        let bytes = super::get_wad()
            .write_to(Cursor::new(Vec::new()))
            .unwrap()
            .into_inner();
        bencher.bench_local(move || {
            divan::black_box(wad_archive::Wad::read_from(Cursor::new(&bytes)).unwrap());
        });
    }
}

pub mod write {
    use divan::Bencher;
    use std::io::Cursor;

    #[divan::bench]
    fn write_archive(bencher: Bencher) {
        bencher.with_inputs(super::get_wad).bench_refs(|wad| {
            divan::black_box(wad.write_to(Cursor::new(Vec::new())).unwrap());
        });
    }
}
