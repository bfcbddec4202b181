use std::io::Write;

use tempfile::NamedTempFile;

pub const HEADER: &str = "id,lat,lng,households,buildDate,score,m2,p,min_sales,max_sales,avg_sales";

/// Ten listings, nine of them valid. The third has zero floor area.
pub fn sample_rows() -> Vec<&'static str> {
    vec![
        "1,37.580,127.0,900,201501,4.5,84.5,15,300000000,500000000,400000000",
        "2,37.6,126.9,200,200812,3.8,1,8,250000000,350000000,300000000",
        "3,37.4,127.1,4000,199506,4.2,0,22,400000000,600000000,500000000",
        "4,37.7,126.8,300,202201,4.8,73.8,5,280000000,320000000,300000000",
        "5,37,127.0919,100,201501,5,84.5,15,300000000,500000000,400000000",
        "6,37.6,126.900,200,200812,3.8,59.2,99,250000000,350000000,300000000",
        "7,37.4,127.001,10900,199506,4.2,102.3,22,400000000,600000000,500000000",
        "8,37.731,126.8,1,202201,0,73.8,5,280000000,320000000,300000000",
        "9,37.5,127.0,100,201501,4.5,84.5,1,300000000,500000000,400000000",
        "10,37.6,126.9,200,200812,3.8,300.2,8,250000000,350000000,300000000",
    ]
}

/// Eight listings exercising every filter. Only ids 1, 7 and 8 survive.
pub fn edge_case_rows() -> Vec<&'static str> {
    vec![
        "1,37.5,127.0,100,201501,4.5,84.5,15,300,500,400",
        "2,37.6,126.9,200,200800,3.8,-10,8,,350,300",
        "3,37.4,127.1,150,199513,4.2,0,-5,400,,",
        "4,37.7,126.8,300,189901,4.8,73.8,0,280,320,300",
        "5,37.5,127.0,100,202701,4.5,84.5,15,300,500,400",
        "6,37.6,126.9,200,203001,3.8,59.2,8,250,350,300",
        "7,37.4,127.1,150,201501,4.2,102.3,22,400,600,500",
        "8,37.7,126.8,300,201501,4.8,1000,50,280,320,1000000",
    ]
}

pub fn csv_content(rows: &[&str]) -> String {
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

/// Write rows under the standard header to a temp file with `suffix`.
pub fn write_listings(rows: &[&str], suffix: &str) -> NamedTempFile {
    write_raw(&csv_content(rows), suffix)
}

pub fn write_raw(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).expect("create temp file");
    write!(file, "{}", content).expect("write temp file");
    file
}
