//! Excel exporter implementation - Workbook grid → Excel (.xlsx)

use crate::error::{XlifferError, XlifferResult};
use crate::excel::workbook::{CellStyle, Sheet, Workbook};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Writes a [`Workbook`] as an .xlsx file
pub struct ExcelExporter<'a> {
    workbook: &'a Workbook,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    /// Export the workbook to an .xlsx file
    pub fn export(&self, output_path: &Path) -> XlifferResult<()> {
        let mut xlsx = self.build()?;
        xlsx.save(output_path)
            .map_err(|e| XlifferError::Export(format!("Failed to save Excel file: {}", e)))
    }

    /// Render the workbook to .xlsx bytes
    pub fn to_buffer(&self) -> XlifferResult<Vec<u8>> {
        let mut xlsx = self.build()?;
        xlsx.save_to_buffer()
            .map_err(|e| XlifferError::Export(format!("Failed to render Excel file: {}", e)))
    }

    fn build(&self) -> XlifferResult<XlsxWorkbook> {
        let mut xlsx = XlsxWorkbook::new();
        for sheet in &self.workbook.sheets {
            let worksheet = xlsx.add_worksheet();
            self.export_sheet(worksheet, sheet)?;
        }
        Ok(xlsx)
    }

    fn export_sheet(&self, worksheet: &mut Worksheet, sheet: &Sheet) -> XlifferResult<()> {
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| XlifferError::Export(format!("Failed to set worksheet name: {}", e)))?;

        for (row, col, cell) in sheet.cells() {
            let row = u32::try_from(row)
                .map_err(|_| XlifferError::Export(format!("Row {} out of range", row)))?;
            let col = u16::try_from(col)
                .map_err(|_| XlifferError::Export(format!("Column {} out of range", col)))?;

            let result = if cell.style.is_default() {
                worksheet.write_string(row, col, &cell.text)
            } else if cell.text.is_empty() {
                worksheet.write_blank(row, col, &to_format(cell.style))
            } else {
                worksheet.write_string_with_format(row, col, &cell.text, &to_format(cell.style))
            };
            result.map_err(|e| {
                XlifferError::Export(format!("Failed to write cell ({}, {}): {}", row, col, e))
            })?;
        }

        Ok(())
    }
}

fn to_format(style: CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    format
}
