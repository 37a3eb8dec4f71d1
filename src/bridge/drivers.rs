//! Python driver programs for the PDF → Office bridges.
//!
//! Each driver is passed to the interpreter with `-c` and receives the input
//! and output paths as `sys.argv[1]` and `sys.argv[2]`. Exit codes follow the
//! bridge contract: 2 for a missing module, 3 when the library fails, 4 when
//! the result cannot be saved. Any exception that escapes `main()` exits 3.

/// Appends the entry point that turns an escaped exception into exit 3.
macro_rules! driver {
    ($body:literal) => {
        concat!(
            $body,
            r#"
try:
    code = main()
except Exception as exc:
    sys.stderr.write(f"conversion failed: {exc}\n")
    code = 3
sys.exit(code)
"#
        )
    };
}

/// pdf2docx: every page, layout-preserving.
pub const PDF_TO_DOCX: &str = driver!(r#"
import sys
try:
    from pdf2docx import Converter
except ImportError:
    sys.stderr.write("pdf2docx module not found. Install it with `pip install pdf2docx`.\n")
    sys.exit(2)

def main():
    input_pdf, output_docx = sys.argv[1:3]
    try:
        converter = Converter(input_pdf)
        converter.convert(output_docx, start=0, end=None)
        converter.close()
    except Exception as exc:
        sys.stderr.write(f"conversion failed: {exc}\n")
        return 3
    return 0
"#);

/// pdf2image at 200 DPI + python-pptx, one full-bleed slide per page.
pub const PDF_TO_PPTX: &str = driver!(r#"
import io
import sys
try:
    from pdf2image import convert_from_path
except ImportError:
    sys.stderr.write("pdf2image module not found. Install it with `pip install pdf2image`.\n")
    sys.exit(2)
try:
    from pptx import Presentation
    from pptx.util import Emu
except ImportError:
    sys.stderr.write("python-pptx module not found. Install it with `pip install python-pptx`.\n")
    sys.exit(2)

DPI = 200

def px_to_emu(px):
    return int(px / DPI * 914400)

def main():
    input_pdf, output_pptx = sys.argv[1:3]
    try:
        images = convert_from_path(input_pdf, dpi=DPI, fmt="png")
    except Exception as exc:
        sys.stderr.write(f"rendering PDF pages failed: {exc}\n")
        return 3

    prs = Presentation()
    if images:
        prs.slide_width = Emu(px_to_emu(images[0].width))
        prs.slide_height = Emu(px_to_emu(images[0].height))
        blank = prs.slide_layouts[6]
        for image in images:
            slide = prs.slides.add_slide(blank)
            stream = io.BytesIO()
            image.save(stream, format="PNG")
            stream.seek(0)
            slide.shapes.add_picture(stream, 0, 0, width=prs.slide_width, height=prs.slide_height)
    try:
        prs.save(output_pptx)
    except Exception as exc:
        sys.stderr.write(f"saving PPTX failed: {exc}\n")
        return 4
    return 0
"#);

/// camelot (stream flavour) + pandas/openpyxl, one sheet per detected table.
pub const PDF_TO_XLSX: &str = driver!(r#"
import sys
try:
    import camelot
except ImportError:
    sys.stderr.write("camelot module not found. Install it with `pip install camelot-py[cv]`.\n")
    sys.exit(2)
try:
    import pandas as pd
except ImportError:
    sys.stderr.write("pandas module not found. Install it with `pip install pandas`.\n")
    sys.exit(2)
try:
    from openpyxl import Workbook
except ImportError:
    sys.stderr.write("openpyxl module not found. Install it with `pip install openpyxl`.\n")
    sys.exit(2)

def main():
    input_pdf, output_xlsx = sys.argv[1:3]
    try:
        tables = camelot.read_pdf(input_pdf, pages="all", flavor="stream")
        if tables.n == 0:
            workbook = Workbook()
            sheet = workbook.active
            sheet.title = "Summary"
            sheet.append(["No tables were detected in the PDF."])
            workbook.save(output_xlsx)
            return 0
        with pd.ExcelWriter(output_xlsx, engine="openpyxl") as writer:
            for idx, table in enumerate(tables, start=1):
                table.df.to_excel(writer, sheet_name=f"Table{idx}", index=False, header=False)
    except Exception as exc:
        sys.stderr.write(f"conversion failed: {exc}\n")
        return 3
    return 0
"#);
