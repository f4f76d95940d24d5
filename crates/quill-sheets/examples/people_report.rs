//! Example: Export a list of records as a styled xlsx report

use chrono::NaiveDate;
use quill_sheets::prelude::*;

struct Employee {
    first: String,
    last: String,
    hired: NaiveDate,
    salary: f64,
    remote: bool,
}

impl Exportable for Employee {
    fn describe(fields: &mut FieldSet<Self>) {
        fields.field("first", |e: &Employee| &e.first).header("First");
        fields.field("last", |e: &Employee| &e.last).header("Last");
        fields
            .field("hired", |e: &Employee| &e.hired)
            .header("Hired")
            .fixed_width(12);
        fields
            .field("salary", |e: &Employee| &e.salary)
            .header("Salary")
            .style(
                CellStyle::new()
                    .number_format("#,##0.00")
                    .alignment(Alignment::Right),
            );
        fields
            .computed("remote", |e: &Employee| if e.remote { "yes" } else { "no" })
            .header("Remote")
            .percent_width(10);
    }
}

fn main() -> Result<()> {
    let staff = vec![
        Employee {
            first: "Ann".into(),
            last: "Lee".into(),
            hired: NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
            salary: 72_500.0,
            remote: true,
        },
        Employee {
            first: "Bo".into(),
            last: "Vance".into(),
            hired: NaiveDate::from_ymd_opt(2021, 11, 15).unwrap(),
            salary: 64_000.0,
            remote: false,
        },
    ];

    let doc = ExcelDocument::builder()
        .theme(Theme::classic())
        .sheet("Staff", |s| {
            s.freeze_header(true)
                .records(&staff)
                .header_group(
                    HeaderGroup::new("Name", ["first", "last"])
                        .with_style(CellStyle::new().background(Color::LIGHT_GRAY)),
                )
                .column_style("last", CellStyle::new().italic(true));
        })
        .build()?;

    let path = std::env::temp_dir().join("people_report.xlsx");
    doc.save(&path)?;
    println!("Created {}", path.display());

    Ok(())
}
