use crate::config::TimeZoneMode;
use crate::models::{Identifier, Record, Row};
use crate::time::format_timestamp;

/// Separator for phone and voicemail lists, shared by the table and the export.
pub const IDENTIFIER_DELIMITER: &str = "; ";

pub const CSV_HEADERS: [&str; 6] = [
    "ID",
    "User ID",
    "Origination Time",
    "Cluster ID",
    "Phones",
    "Voicemails",
];

pub const CSV_FILENAME: &str = "data.csv";

pub fn project(records: &[Record], zone: TimeZoneMode) -> Vec<Row> {
    records.iter().map(|record| project_record(record, zone)).collect()
}

pub fn project_record(record: &Record, zone: TimeZoneMode) -> Row {
    Row {
        id: record.id.to_string(),
        user_id: record.user_id.clone(),
        origination_time: format_timestamp(record.origination_time, zone),
        cluster_id: record.cluster_id.clone(),
        phones: join_identifiers(&record.phones),
        voicemails: join_identifiers(&record.voicemails),
    }
}

fn join_identifiers(items: &[Identifier]) -> String {
    items
        .iter()
        .map(|item| item.identifier.as_str())
        .collect::<Vec<_>>()
        .join(IDENTIFIER_DELIMITER)
}

pub fn to_csv(rows: &[Row]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(csv_line(CSV_HEADERS));
    lines.extend(rows.iter().map(|row| csv_line(row.fields())));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn csv_line(fields: [&str; 6]) -> String {
    fields
        .iter()
        .map(|field| csv_escape(field))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn identifiers(values: &[&str]) -> Vec<Identifier> {
        values
            .iter()
            .map(|value| Identifier {
                identifier: value.to_string(),
            })
            .collect()
    }

    fn sample_record() -> Record {
        Record {
            id: RecordId::Number(1),
            user_id: "u1".into(),
            origination_time: 1_704_067_200,
            cluster_id: "c1".into(),
            phones: identifiers(&["+1555"]),
            voicemails: Vec::new(),
        }
    }

    #[test]
    fn projects_single_phone_record() {
        let row = project_record(&sample_record(), TimeZoneMode::Utc);
        assert_eq!(row.id, "1");
        assert_eq!(row.user_id, "u1");
        assert_eq!(row.origination_time, "1/1/2024, 12:00:00 AM");
        assert_eq!(row.cluster_id, "c1");
        assert_eq!(row.phones, "+1555");
        assert_eq!(row.voicemails, "");
    }

    #[test]
    fn joins_lists_in_order_with_one_delimiter() {
        let mut record = sample_record();
        record.phones = identifiers(&["+1", "+2", "+3"]);
        record.voicemails = identifiers(&["vm-b", "vm-a"]);
        let row = project_record(&record, TimeZoneMode::Utc);
        assert_eq!(row.phones, "+1; +2; +3");
        assert_eq!(row.voicemails, "vm-b; vm-a");
    }

    #[test]
    fn projection_preserves_order_and_count() {
        let mut second = sample_record();
        second.id = RecordId::Text("b".into());
        let records = vec![sample_record(), second, sample_record()];
        let rows = project(&records, TimeZoneMode::Utc);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].id, "b");
        assert_eq!(rows, project(&records, TimeZoneMode::Utc));
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let rows = project(&[sample_record(), sample_record()], TimeZoneMode::Utc);
        let csv = to_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "ID,User ID,Origination Time,Cluster ID,Phones,Voicemails"
        );
        assert_eq!(lines[1], "1,u1,\"1/1/2024, 12:00:00 AM\",c1,+1555,");
    }

    #[test]
    fn csv_of_no_rows_is_just_the_header() {
        assert_eq!(
            to_csv(&[]),
            "ID,User ID,Origination Time,Cluster ID,Phones,Voicemails\n"
        );
    }

    #[test]
    fn escapes_quotes_and_separators() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }
}
