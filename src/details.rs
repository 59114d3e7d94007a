use std::{
    collections::HashSet,
    fs::{create_dir_all, read_dir, File},
    path::Path,
};

use crate::{api::PlacesService, utils::progress_bar, Error, PlaceId, PlaceRecord, Result};

/// Fetches the full record of every id. A failed request aborts the whole
/// pass.
pub fn place_details(
    ids: &HashSet<PlaceId>,
    service: &impl PlacesService,
) -> Result<Vec<PlaceRecord>> {
    let mut records = Vec::new();
    for id in ids {
        records.push(service.place_details(id)?);
    }
    Ok(records)
}

/// Fault-tolerant variant of [`place_details`]: writes each record to
/// `<folder>/<id>.json.zst` and keeps going when the service turns an id
/// down. Returns the failed ids. Re-fetching an id overwrites its file.
pub fn place_details_to_folder(
    ids: &HashSet<PlaceId>,
    folder: &Path,
    service: &impl PlacesService,
) -> Result<Vec<PlaceId>> {
    create_dir_all(folder)?;
    let mut failed = Vec::new();

    let bar = progress_bar(ids.len() as u64);
    for id in ids {
        bar.inc(1);
        let record = match service.place_details(id) {
            Ok(x) => x,
            Err(Error::Status(_)) => {
                failed.push(id.clone());
                continue;
            }
            Err(x) => return Err(x),
        };

        write_record(&folder.join(format!("{id}.json.zst")), &record)?;
    }
    bar.finish_and_clear();

    Ok(failed)
}

/// Reads every record previously written to `folder` back into memory, in
/// no particular order.
pub fn read_records(folder: &Path) -> Result<Vec<PlaceRecord>> {
    let mut records = Vec::new();
    for entry in read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        records.push(read_record(&path)?);
    }
    Ok(records)
}

fn write_record(path: &Path, record: &PlaceRecord) -> Result<()> {
    let mut encoder = zstd::Encoder::new(File::create(path)?, 0)?;
    serde_json::to_writer(&mut encoder, record)?;
    encoder.finish()?;
    Ok(())
}

fn read_record(path: &Path) -> Result<PlaceRecord> {
    let decoder = zstd::Decoder::new(File::open(path)?)
        .map_err(|x| Error::Parse(format!("{}: {x}", path.display())))?;
    serde_json::from_reader(decoder).map_err(|x| Error::Parse(format!("{}: {x}", path.display())))
}
