//! Read-only lookup tables shared by the site operations.
//!
//! [`SiteTables`] bundles the per-page SEO metadata (the allow-list for the
//! `seo` operation) and the ordered translation table used by `translate`.
//! It is built once at start-up, either from the built-in data at the bottom
//! of this file or from a JSON file, and then handed to every operation by
//! reference.

use crate::error::PatchError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// SEO metadata for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoRecord {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

/// One source → target pair of the translation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub source: String,
    pub target: String,
}

/// SEO table + translation table.
///
/// The JSON form mirrors the struct:
///
/// ```json
/// {
///   "seo": { "word.html": { "title": "…", "description": "…", "keywords": "…" } },
///   "translations": [ { "source": "다운로드", "target": "Download" } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteTables {
    /// File name → SEO record. Files missing here are skipped by `seo`.
    #[serde(default)]
    pub seo: BTreeMap<String, SeoRecord>,

    /// Applied front to back. Matching is plain substring matching, so an
    /// entry can also hit inside a longer unrelated string.
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl Default for SiteTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SiteTables {
    /// The tables shipped with the crate.
    pub fn builtin() -> Self {
        let seo = BUILTIN_SEO
            .iter()
            .map(|&(file, title, description, keywords)| {
                (
                    file.to_string(),
                    SeoRecord {
                        title: title.to_string(),
                        description: description.to_string(),
                        keywords: keywords.to_string(),
                    },
                )
            })
            .collect();

        let translations = BUILTIN_TRANSLATIONS
            .iter()
            .map(|&(source, target)| Translation {
                source: source.to_string(),
                target: target.to_string(),
            })
            .collect();

        Self { seo, translations }
    }

    /// Load tables from a JSON file.
    ///
    /// # Errors
    /// [`PatchError::TablesRead`] if the file cannot be read and
    /// [`PatchError::TablesParse`] if it is not a valid tables document.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PatchError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PatchError::TablesRead {
            path: path.to_path_buf(),
            source,
        })?;
        let tables: SiteTables =
            serde_json::from_str(&raw).map_err(|source| PatchError::TablesParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "Loaded {} SEO records and {} translations from {}",
            tables.seo.len(),
            tables.translations.len(),
            path.display()
        );
        Ok(tables)
    }

    /// SEO record for `file_name`, if the page is on the allow-list.
    pub fn seo_record(&self, file_name: &str) -> Option<&SeoRecord> {
        self.seo.get(file_name)
    }
}

// ── Built-in data ────────────────────────────────────────────────────────

const BUILTIN_SEO: &[(&str, &str, &str, &str)] = &[
    (
        "word.html",
        "PDF to Word Converter - Free Online Tool | Convert4U",
        "Convert PDF to Word online for free. Transform PDF files to editable DOCX format quickly and easily. No registration required, unlimited conversions.",
        "PDF to Word, PDF converter, PDF to DOCX, free PDF converter, edit PDF, PDF to Word online",
    ),
    (
        "excel.html",
        "PDF to Excel Converter - Free Online Tool | Convert4U",
        "Convert PDF to Excel online for free. Extract tables and data from PDF to XLS/XLSX spreadsheets. Fast and accurate conversion.",
        "PDF to Excel, PDF to XLS, PDF to XLSX, PDF table converter, PDF data extraction, free Excel converter",
    ),
    (
        "ppt.html",
        "PDF to PowerPoint Converter - Free Online Tool | Convert4U",
        "Convert PDF to PowerPoint online for free. Transform PDF files to editable PPT/PPTX presentations quickly.",
        "PDF to PowerPoint, PDF to PPT, PDF to PPTX, PDF presentation converter, free PowerPoint converter",
    ),
    (
        "jpg.html",
        "PDF to JPG Converter - Free Online Tool | Convert4U",
        "Convert PDF to JPG images online for free. Extract all pages from PDF as high-quality JPG files. No registration required.",
        "PDF to JPG, PDF to image, PDF to JPEG, PDF image extraction, free image converter",
    ),
    (
        "png.html",
        "PDF to PNG Converter - Free Online Tool | Convert4U",
        "Convert PDF to PNG images online for free. Extract pages from PDF to PNG format with transparency support.",
        "PDF to PNG, PDF to image, PNG converter, PDF extraction, free PNG converter",
    ),
    (
        "compress-pdf.html",
        "Compress PDF - Reduce PDF File Size Online | Convert4U",
        "Compress PDF files online for free. Reduce PDF file size while maintaining quality. Fast and easy compression.",
        "compress PDF, reduce PDF size, PDF compression, shrink PDF, optimize PDF, free PDF compressor",
    ),
    (
        "split-pdf.html",
        "Split PDF - Divide PDF into Multiple Files | Convert4U",
        "Split PDF files online for free. Divide large PDF documents into separate files by page ranges.",
        "split PDF, divide PDF, separate PDF pages, PDF splitter, extract PDF pages",
    ),
    (
        "merge-pdf.html",
        "Merge PDF - Combine PDF Files Online | Convert4U",
        "Merge multiple PDF files into one online for free. Combine PDF documents quickly and easily.",
        "merge PDF, combine PDF, join PDF, PDF merger, unite PDF files, concatenate PDF",
    ),
    (
        "word2pdf.html",
        "Word to PDF Converter - Free Online Tool | Convert4U",
        "Convert Word to PDF online for free. Transform DOCX/DOC files to PDF format with perfect formatting.",
        "Word to PDF, DOCX to PDF, DOC to PDF, Word converter, free PDF creator",
    ),
    (
        "excel2pdf.html",
        "Excel to PDF Converter - Free Online Tool | Convert4U",
        "Convert Excel to PDF online for free. Transform XLS/XLSX spreadsheets to PDF with high quality.",
        "Excel to PDF, XLS to  PDF, XLSX to PDF, spreadsheet to PDF, Excel converter",
    ),
    (
        "ppt2pdf.html",
        "PowerPoint to PDF Converter - Free Online Tool | Convert4U",
        "Convert PowerPoint to PDF online for free. Transform PPT/PPTX presentations to PDF format.",
        "PowerPoint to PDF, PPT to PDF, PPTX to PDF, presentation to PDF, PowerPoint converter",
    ),
    (
        "heic-to-jpg.html",
        "HEIC to JPG Converter - Free Online Tool | Convert4U",
        "Convert HEIC to JPG online for free. Transform iPhone/iPad photos to JPG format quickly and easily. No registration required, unlimited conversions.",
        "HEIC to JPG, HEIC converter, iPhone photo converter, Apple image conversion, free image converter, HEIC to JPEG",
    ),
    (
        "heic-to-png.html",
        "HEIC to PNG Converter - Free Online Tool | Convert4U",
        "Convert HEIC to PNG online for free. Transform iPhone/iPad photos to PNG format with transparency support.",
        "HEIC to PNG, HEIC converter, iPhone image converter, Apple photo conversion, HEIC to PNG online",
    ),
    (
        "jpg-to-png.html",
        "JPG to PNG Converter - Free Online Tool | Convert4U",
        "Convert JPG to PNG online for free. Transform JPEG images to PNG format with transparency support.",
        "JPG to PNG, JPEG to PNG, image converter, JPG converter, free PNG converter",
    ),
    (
        "png-to-jpg.html",
        "PNG to JPG Converter - Free Online Tool | Convert4U",
        "Convert PNG to JPG online for free. Transform PNG images to JPEG format for smaller file sizes.",
        "PNG to JPG, PNG to JPEG, image converter, PNG converter, compress PNG",
    ),
    (
        "jpg-to-webp.html",
        "JPG to WebP Converter - Free Online Tool | Convert4U",
        "Convert JPG to WebP online for free. Transform JPEG images to modern WebP format for better compression.",
        "JPG to WebP, JPEG to WebP, image optimization, WebP converter, reduce image size",
    ),
    (
        "png-to-webp.html",
        "PNG to WebP Converter - Free Online Tool | Convert4U",
        "Convert PNG to WebP online for free. Optimize images with modern WebP format for faster loading.",
        "PNG to WebP, image optimization, WebP converter, compress PNG, reduce file size",
    ),
    (
        "webp-to-jpg.html",
        "WebP to JPG Converter - Free Online Tool | Convert4U",
        "Convert WebP to JPG online for free. Transform WebP images to widely supported JPEG format.",
        "WebP to JPG, WebP to JPEG, WebP converter, image converter",
    ),
    (
        "webp-to-png.html",
        "WebP to PNG Converter - Free Online Tool | Convert4U",
        "Convert WebP to PNG online for free. Transform WebP images to PNG format with transparency.",
        "WebP to PNG, WebP converter, image converter, PNG converter",
    ),
    (
        "image-resize.html",
        "Image Resizer - Resize Images Online Free | Convert4U",
        "Resize images online for free. Change image dimensions and optimize file size. Supports JPG, PNG, WebP formats.",
        "resize image, image resizer, reduce image size, scale image, optimize image",
    ),
    (
        "mp3.html",
        "MP3 Converter - Convert Audio to MP3 Online | Convert4U",
        "Convert audio files to MP3 online for free. Support for WAV, OGG, M4A, AAC and more. High quality conversion.",
        "MP3 converter, audio converter, convert to MP3, audio to MP3, free MP3 converter",
    ),
    (
        "wav.html",
        "WAV Converter - Convert Audio to WAV Online | Convert4U",
        "Convert audio files to WAV online for free. High quality lossless audio conversion.",
        "WAV converter, audio converter, convert to WAV, MP3 to WAV, audio to WAV",
    ),
    (
        "ogg.html",
        "OGG Converter - Convert Audio to OGG Online | Convert4U",
        "Convert audio files to OGG Vorbis format online for free. Open-source audio compression.",
        "OGG converter, audio converter, convert to OGG, OGG Vorbis, free audio converter",
    ),
    (
        "m4a.html",
        "M4A Converter - Convert Audio to M4A Online | Convert4U",
        "Convert audio files to M4A format online for free. High quality AAC audio compression.",
        "M4A converter, audio converter, convert to M4A, AAC converter, free M4A converter",
    ),
    (
        "aac.html",
        "AAC Converter - Convert Audio to AAC Online | Convert4U",
        "Convert audio files to AAC format online for free. Advanced audio coding with high efficiency.",
        "AAC converter, audio converter, convert to AAC, audio compression, free AAC converter",
    ),
    (
        "mp4.html",
        "MP4 Converter - Convert Video to MP4 Online | Convert4U",
        "Convert videos to MP4 format online for free. Universal video format compatible with all devices.",
        "MP4 converter, video converter, convert to MP4, video to MP4, free MP4 converter",
    ),
    (
        "mov.html",
        "MOV Converter - Convert Video to MOV Online | Convert4U",
        "Convert videos to MOV format online for free. QuickTime movie format for Mac and iOS.",
        "MOV converter, video converter, convert to MOV, QuickTime converter, video to MOV",
    ),
    (
        "webm.html",
        "WebM Converter - Convert Video to WebM Online | Convert4U",
        "Convert videos to WebM format online for free. Modern web video format with efficient compression.",
        "WebM converter, video converter, convert to WebM, web video, free WebM converter",
    ),
    (
        "mkv.html",
        "MKV Converter - Convert Video to MKV Online | Convert4U",
        "Convert videos to MKV format online for free. Matroska container for high quality video.",
        "MKV converter, video converter, convert to MKV, Matroska, free MKV converter",
    ),
    (
        "video-compress.html",
        "Compress Video - Reduce Video File Size Online | Convert4U",
        "Compress video files online for free. Reduce file size while maintaining quality. Fast video compression.",
        "compress video, reduce video size, video compression, shrink video, optimize video",
    ),
    (
        "video-gif.html",
        "Video to GIF Converter - Create GIF from Video | Convert4U",
        "Convert video to GIF online for free. Create animated GIFs from video files quickly and easily.",
        "video to GIF, GIF maker, create GIF, video converter, animated GIF",
    ),
    (
        "faq.html",
        "FAQ - Frequently Asked Questions | Convert4U",
        "Find answers to common questions about Convert4U file conversion service. Learn about supported formats, privacy, and features.",
        "FAQ, help, questions, support, file conversion help",
    ),
    (
        "user-guide.html",
        "User Guide - How to Use Convert4U | Convert4U",
        "Learn how to use Convert4U to convert files online. Step-by-step guide for all conversion tools.",
        "user guide, tutorial, how to use, help, instructions",
    ),
    (
        "contact.html",
        "Contact Us - Get in Touch | Convert4U",
        "Contact Convert4U for support, feedback, or business inquiries. We're here to help.",
        "contact, support, feedback, help, inquiries",
    ),
    (
        "feature-request.html",
        "Feature Request - Suggest New Features | Convert4U",
        "Suggest new features or improvements for Convert4U. We value your feedback.",
        "feature request, suggestions, feedback, improvements",
    ),
    (
        "privacy-policy.html",
        "Privacy Policy - Your Data Protection | Convert4U",
        "Read our privacy policy to understand how we protect your data and respect your privacy.",
        "privacy policy, data protection, privacy, security",
    ),
    (
        "terms-of-service.html",
        "Terms of Service - Usage Agreement | Convert4U",
        "Read the terms of service for using Convert4U file conversion service.",
        "terms of service, terms, agreement, legal",
    ),
];

const BUILTIN_TRANSLATIONS: &[(&str, &str)] = &[
    ("무료 파일 변환 도구", "Free File Converter"),
    ("PDF, 이미지, 오디오, 비디오 등 다양한 형식으로 빠르게 변환하세요", "Convert PDF, images, audio, and video quickly and securely"),
    ("PDF to Word 변환", "PDF to Word Converter"),
    ("PDF 파일을 Word (.docx)로 빠르게 변환하세요", "Convert PDF to Word quickly"),
    ("PDF to Excel 변환", "PDF to Excel Converter"),
    ("PDF 파일을 Excel (.xlsx)로 빠르게 변환하세요", "Convert PDF to Excel quickly"),
    ("PDF to PowerPoint 변환", "PDF to PowerPoint Converter"),
    ("PDF 파일을 PowerPoint (.pptx)로 빠르게 변환하세요", "Convert PDF to PowerPoint quickly"),
    ("PDF to JPG 변환", "PDF to JPG Converter"),
    ("PDF 파일을 JPG 이미지로 빠르게 변환하세요", "Convert PDF to JPG images quickly"),
    ("PDF to PNG 변환", "PDF to PNG Converter"),
    ("PDF 파일을 PNG 이미지로 빠르게 변환하세요", "Convert PDF to PNG images quickly"),
    ("HEIC to JPG 변환", "HEIC to JPG Converter"),
    ("HEIC 파일을 JPG으로 빠르게 변환하세요", "Convert HEIC to JPG quickly"),
    ("HEIC to PNG 변환", "HEIC to PNG Converter"),
    ("HEIC 파일을 PNG으로 빠르게 변환하세요", "Convert HEIC to PNG quickly"),
    ("파일을 선택하세요", "Select a file"),
    ("PDF 파일을 드래그하거나 클릭하여 선택", "Drag and drop or click to select PDF file"),
    ("파일 선택", "Select File"),
    ("파일이 준비되었습니다", "File is ready"),
    ("변환 시작", "Convert"),
    ("다른 파일", "Another File"),
    ("변환 중입니다", "Converting"),
    ("잠깐만 기다려주세요...", "Please wait..."),
    ("변환이 완료되었습니다! 🎉", "Conversion Complete! 🎉"),
    ("파일을 다운로드하여 사용하세요", "Download your file"),
    ("다운로드", "Download"),
    ("새로운 파일 변환하기", "Convert Another File"),
    ("다시 선택", "Select Again"),
    ("파일 크기", "File Size"),
    ("형식", "Format"),
    ("대상 형식", "Target Format"),
    ("를 Word로 변환 중", " converting to Word"),
    ("변환 도구 선택", "Choose Conversion Tool"),
    ("PDF 변환", "PDF Conversion"),
    ("PDF 관리", "PDF Management"),
    ("Office → PDF", "Office → PDF"),
    ("이미지 변환", "Image Conversion"),
    ("오디오 & 비디오", "Audio & Video"),
    ("편집 가능한 Word 문서로", "Convert to editable Word"),
    ("스프레드시트로 변환", "Convert to spreadsheet"),
    ("프레젠테이션으로 변환", "Convert to presentation"),
    ("JPG 이미지로 변환", "Convert to JPG images"),
    ("PNG 이미지로 변환", "Convert to PNG images"),
    ("PDF 파일 크기 줄이기", "Reduce PDF file size"),
    ("PDF를 여러 파일로 분할", "Split PDF into files"),
    ("여러 PDF를 하나로 병합", "Merge multiple PDFs"),
    ("Word 문서를 PDF로", "Convert Word to PDF"),
    ("Excel 파일을 PDF로", "Convert Excel to PDF"),
    ("PPT 파일을 PDF로", "Convert PowerPoint to PDF"),
    ("Apple 형식을 JPG로", "Convert Apple format to JPG"),
    ("Apple 형식을 PNG로", "Convert Apple format to PNG"),
    ("JPG를 PNG로 변환", "Convert JPG to PNG"),
    ("PNG를 JPG로 변환", "Convert PNG to JPG"),
    ("최신 형식으로 최적화", "Optimize to modern format"),
    ("WebP를 JPG로 변환", "Convert WebP to JPG"),
    ("WebP를 PNG로 변환", "Convert WebP to PNG"),
    ("이미지 크기 조정", "Resize images"),
    ("오디오를 MP3로", "Convert to MP3"),
    ("오디오를 WAV로", "Convert to WAV"),
    ("오디오를 OGG로", "Convert to OGG"),
    ("오디오를 M4A로", "Convert to M4A"),
    ("오디오를 AAC로", "Convert to AAC"),
    ("비디오를 MP4로", "Convert to MP4"),
    ("비디오를 MOV로", "Convert to MOV"),
    ("비디오를 WebM로", "Convert to WebM"),
    ("비디오를 MKV로", "Convert to MKV"),
    ("비디오 파일 크기 줄이기", "Reduce video file size"),
    ("비디오를 GIF로 변환", "Convert video to GIF"),
    ("주요 기능", "Key Features"),
    ("빠른 변환", "Fast Conversion"),
    ("몇 초 내에 PDF를 변환합니다", "Convert files in seconds"),
    ("안전한 변환", "Secure Conversion"),
    ("256비트 SSL 암호화로 보호합니다", "Protected with 256-bit SSL encryption"),
    ("256비트 SSL 암호화로 보호", "Protected with SSL encryption"),
    ("모든 장치 지원", "All Devices Supported"),
    ("PC, 태블릿, 스마트폰 모두 지원합니다", "Works on PC, tablet, and smartphone"),
    ("PC, 태블릿, 스마트폰", "PC, tablet, smartphone"),
    ("쉬운 다운로드", "Easy Download"),
    ("변환 완료 후 바로 다운로드 가능합니다", "Download immediately after conversion"),
    ("고품질 결과", "High Quality Results"),
    ("형식 유지하며 완벽 변환", "Perfect conversion maintaining format"),
    ("무료 PDF 변환", "Free PDF Conversion"),
    ("PDF to Word 변환에 대해", "About PDF to Word Conversion"),
    ("HEIC to JPG 변환에 대해", "About HEIC to JPG Conversion"),
    ("PDF to Word 변환 도구는 PDF 파일을 쉽게 편집 가능한 Word 문서로 변환합니다.", "PDF to Word converter easily transforms PDF files into editable Word documents."),
    ("텍스트, 이미지, 서식을 유지하면서 완벽하게 변환됩니다.", "Perfectly converts while maintaining text, images, and formatting."),
    ("HEIC to JPG 변환 도구는 PDF 파일을 쉽게 편집 가능한 Word 문서로 변환합니다.", "HEIC to JPG converter easily transforms iPhone photos to JPG format."),
    ("PDF Converter는 PDF 파일을 다양한 형식으로 쉽게 변환하는 온라인 도구입니다.", "Convert4U is an online tool that easily converts files to various formats."),
    ("회원가입 없이 무제한으로 이용할 수 있습니다.", "Use unlimited without registration."),
    ("왜 우리를 선택하나요?", "Why Choose Us?"),
    ("무료이고 제한이 없습니다", "Free and unlimited"),
    ("등록이 필요하지 않습니다", "No registration required"),
    ("높은 품질의 변환 결과", "High quality results"),
    ("빠른 처리 속도", "Fast processing"),
    ("24시간 이용 가능합니다", "Available 24/7"),
    ("무료 온라인 PDF 변환 도구로 다양한 형식으로 변환하세요.", "Free online file converter for various formats."),
    ("무료 온라인 파일 변환 도구로 PDF, 이미지, 오디오, 비디오 등을 변환하세요.", "Free online file converter for PDF, images, audio, and video."),
    ("변환 도구", "Conversion Tools"),
    ("정보", "Information"),
    ("개인정보 보호정책", "Privacy Policy"),
    ("이용약관", "Terms of Service"),
    ("문의하기", "Contact Us"),
    ("지원", "Support"),
    ("자주 묻는 질문", "FAQ"),
    ("사용 가이드", "User Guide"),
    ("기능 요청", "Feature Request"),
    ("모든 권리 보유.", "All rights reserved."),
    ("광고", "Advertisement"),
    ("PDF 압축", "Compress PDF"),
    ("PDF 분할", "Split PDF"),
    ("PDF 병합", "Merge PDF"),
    ("이미지 리사이즈", "Image Resize"),
    ("비디오 압축", "Video Compress"),
    ("비디오 to GIF", "Video to GIF"),
    ("MP3 변환", "MP3 Converter"),
    ("WAV 변환", "WAV Converter"),
    ("OGG 변환", "OGG Converter"),
    ("M4A 변환", "M4A Converter"),
    ("AAC 변환", "AAC Converter"),
    ("MP4 변환", "MP4 Converter"),
    ("MOV 변환", "MOV Converter"),
    ("WebM 변환", "WebM Converter"),
    ("MKV 변환", "MKV Converter"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_populated() {
        let tables = SiteTables::builtin();
        assert_eq!(tables.seo.len(), BUILTIN_SEO.len());
        assert_eq!(tables.translations.len(), BUILTIN_TRANSLATIONS.len());
        assert!(tables.seo_record("word.html").is_some());
        assert!(tables.seo_record("index.html").is_none());
    }

    #[test]
    fn builtin_seo_keys_have_no_stray_whitespace() {
        for key in SiteTables::builtin().seo.keys() {
            assert_eq!(key.trim(), key, "key {key:?} has surrounding whitespace");
            assert!(key.ends_with(".html"), "key {key:?} is not an html page");
        }
    }

    #[test]
    fn json_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        let tables = SiteTables::builtin();
        std::fs::write(&path, serde_json::to_string_pretty(&tables).unwrap()).unwrap();

        let loaded = SiteTables::from_json_file(&path).unwrap();
        assert_eq!(loaded, tables);
    }

    #[test]
    fn partial_json_defaults_missing_tables_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        std::fs::write(
            &path,
            r#"{"seo":{"a.html":{"title":"A","description":"d","keywords":"k"}}}"#,
        )
        .unwrap();

        let loaded = SiteTables::from_json_file(&path).unwrap();
        assert_eq!(loaded.seo.len(), 1);
        assert!(loaded.translations.is_empty());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SiteTables::from_json_file(&path).unwrap_err();
        assert!(matches!(err, PatchError::TablesParse { .. }), "got: {err}");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = SiteTables::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, PatchError::TablesRead { .. }), "got: {err}");
    }
}
