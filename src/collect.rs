use std::{
    collections::HashSet,
    fs::{read_to_string, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{api::PlacesService, utils::progress_bar, Error, GeoPoint, PlaceId, Result};

/// Queries the service once per grid point and returns every distinct place
/// id seen. A failed request aborts the whole pass.
pub fn place_ids(
    grid: &[GeoPoint],
    place_type: &str,
    service: &impl PlacesService,
) -> Result<HashSet<PlaceId>> {
    let mut ids = HashSet::new();
    for point in grid {
        ids.extend(service.nearby_search(*point, place_type)?);
    }
    Ok(ids)
}

/// Fault-tolerant variant of [`place_ids`]: appends `"<grid index> <id>"`
/// lines to `path` as each point is answered and keeps going when the
/// service turns a point down. Returns the failed points. The file is
/// truncated once at the start of the run, so a killed run leaves the lines
/// collected so far behind.
pub fn place_ids_to_file(
    grid: &[GeoPoint],
    place_type: &str,
    path: &Path,
    service: &impl PlacesService,
) -> Result<Vec<GeoPoint>> {
    let mut file = File::create(path)?;
    let mut failed = Vec::new();

    let bar = progress_bar(grid.len() as u64);
    for (i, point) in grid.iter().enumerate() {
        bar.inc(1);
        let ids = match service.nearby_search(*point, place_type) {
            Ok(x) => x,
            Err(Error::Status(_)) => {
                failed.push(*point);
                continue;
            }
            Err(x) => return Err(x),
        };

        for id in ids {
            writeln!(file, "{i} {id}")?;
        }
    }
    bar.finish_and_clear();

    Ok(failed)
}

/// Extracts the place ids from files written by [`place_ids_to_file`],
/// deduplicated across all of them.
pub fn unique_ids(files: &[PathBuf]) -> Result<HashSet<PlaceId>> {
    let mut ids = HashSet::new();
    for path in files {
        for (n, line) in read_to_string(path)?.lines().enumerate() {
            let id = line.split_whitespace().nth(1).ok_or_else(|| {
                Error::Parse(format!("{}:{}: missing place id", path.display(), n + 1))
            })?;
            ids.insert(PlaceId::new(id));
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, fs::write};

    use super::*;
    use crate::PlaceRecord;

    struct Fake {
        results: BTreeMap<&'static str, Vec<&'static str>>,
        denied: Vec<&'static str>,
    }

    impl PlacesService for Fake {
        fn nearby_search(&self, location: GeoPoint, _place_type: &str) -> Result<Vec<PlaceId>> {
            let key = location.to_string();
            if self.denied.contains(&key.as_str()) {
                return Err(Error::Status("REQUEST_DENIED".to_string()));
            }
            Ok(self.results[key.as_str()].iter().map(|x| PlaceId::new(*x)).collect())
        }

        fn place_details(&self, _id: &PlaceId) -> Result<PlaceRecord> {
            unreachable!()
        }
    }

    #[test]
    fn collects_distinct_ids() {
        let fake = Fake {
            results: [("0,0", vec!["a", "b"]), ("1,0", vec!["b", "c"])].into(),
            denied: vec![],
        };
        let grid = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)];

        let ids = place_ids(&grid, "restaurant", &fake).unwrap();
        assert_eq!(ids, HashSet::from(["a", "b", "c"].map(PlaceId::new)));
    }

    #[test]
    fn aborts_on_denied_point() {
        let fake = Fake {
            results: [("0,0", vec!["a"])].into(),
            denied: vec!["1,0"],
        };
        let grid = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)];

        let err = place_ids(&grid, "cafe", &fake).unwrap_err();
        assert!(matches!(err, Error::Status(x) if x == "REQUEST_DENIED"));
    }

    #[test]
    fn records_failed_points_and_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        let fake = Fake {
            results: [("0,0", vec!["a", "b"]), ("2,0", vec!["c"])].into(),
            denied: vec!["1,0"],
        };
        let grid = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(2.0, 0.0),
        ];

        let failed = place_ids_to_file(&grid, "cafe", &path, &fake).unwrap();
        assert_eq!(failed, vec![GeoPoint::new(1.0, 0.0)]);
        assert_eq!(read_to_string(&path).unwrap(), "0 a\n0 b\n2 c\n");
    }

    #[test]
    fn truncates_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        write(&path, "9 stale\n").unwrap();
        let fake = Fake {
            results: [("0,0", vec!["a"])].into(),
            denied: vec![],
        };

        place_ids_to_file(&[GeoPoint::new(0.0, 0.0)], "cafe", &path, &fake).unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "0 a\n");
    }

    #[test]
    fn merges_ids_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        write(&first, "0 abc\n").unwrap();
        write(&second, "1 abc\n2 def\n").unwrap();

        let ids = unique_ids(&[first, second]).unwrap();
        assert_eq!(ids, HashSet::from(["abc", "def"].map(PlaceId::new)));
    }

    #[test]
    fn rejects_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        write(&path, "0 abc\n1\n").unwrap();

        let err = unique_ids(&[path]).unwrap_err();
        assert!(matches!(&err, Error::Parse(x) if x.contains("ids.txt:2")));
    }
}
