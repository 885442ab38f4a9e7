use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_test::traced_test;
use wad_archive::{error::Error, read::WadArchive, Lump, Wad, WadKind};

fn scratch_dir(name: &str) -> Result<PathBuf, Error> {
    let dir = std::env::temp_dir().join(format!("wad_archive-read-{}-{name}", std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn sample_wad() -> Wad {
    let mut wad = Wad::new(WadKind::Internal);
    wad.add_lump(Lump::new("PLAYPAL", (0..=255).collect()));
    wad.add_lump(Lump::new("E1M1", Vec::new()));
    wad.add_lump(Lump::new("THINGS", b"first things".to_vec()));
    wad.add_lump(Lump::new("LINEDEFS", vec![0xAB; 140]));
    wad.add_lump(Lump::new("E1M2", Vec::new()));
    wad.add_lump(Lump::new("THINGS", b"second things".to_vec()));
    wad
}

#[traced_test]
#[test]
fn validate_wad_parsing() -> Result<(), Error> {
    let dir = scratch_dir("parsing")?;
    let path = dir.join("sample.wad");
    let expected = sample_wad();
    expected.save(&path)?;
    info!("testing {}", path.display());

    let mut archive = WadArchive::new(BufReader::new(File::open(&path)?))?;
    assert_eq!(archive.len(), expected.len());
    assert_eq!(archive.kind(), WadKind::Internal);

    for (i, lump) in expected.lumps().iter().enumerate() {
        let mut actual = Vec::new();
        let mut wad_lump = archive.by_index(i)?;
        info!("comparing {}", wad_lump.name());

        assert_eq!(wad_lump.name(), lump.name);
        assert_eq!(wad_lump.size(), lump.data.len() as u64);
        wad_lump.read_to_end(&mut actual)?;
        assert_eq!(actual, lump.data);
    }

    assert_eq!(archive.indices_for_name("THINGS"), &[2, 5]);

    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn directory_may_follow_the_data() -> Result<(), Error> {
    #[rustfmt::skip]
    let input = [
        // Header (12)
        0x50, 0x57, 0x41, 0x44,
        0x02, 0x00, 0x00, 0x00,
        0x10, 0x00, 0x00, 0x00,
        // Data (4)
        0x01, 0x02, 0x03, 0x04,
        // Directory (32)
        0x0C, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00,
        0x44, 0x53, 0x50, 0x49, 0x53, 0x54, 0x4F, 0x4C,
        0x0F, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
        0x43, 0x4F, 0x4C, 0x4F, 0x52, 0x4D, 0x41, 0x50,
    ];

    let wad = Wad::read_from(std::io::Cursor::new(input))?;
    assert_eq!(wad.kind(), WadKind::Patch);
    assert_eq!(
        wad.lumps(),
        &[
            Lump::new("DSPISTOL", vec![1, 2, 3]),
            Lump::new("COLORMAP", vec![4]),
        ]
    );

    Ok(())
}
