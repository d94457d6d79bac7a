//! Closed dictionary of known Indonesian roots.

use std::collections::HashSet;

/// Everyday roots shipped with the analyzer.
const COMMON_ROOTS: &[&str] = &[
    // verbs
    "makan", "minum", "tidur", "kerja", "jalan", "baca", "tulis", "lihat", "dengar", "bicara",
    "pikir", "rasa", "buat", "beli", "jual", "kirim", "terima", "buka", "tutup", "mulai",
    "akhir", "masuk", "keluar", "naik", "turun", "datang", "pergi", "duduk", "berdiri", "lari",
    "terbang", "renang", "main", "bantu", "ajar", "belajar", "paham", "tahu", "ingat", "lupa",
    "cinta", "suka", "benci", "takut", "berani", "marah", "sedih", "senang", "bahagia", "masak",
    "pukul", "sapu", "tanam", "nyanyi", "ambil", "gambar", "cari", "tanya", "jawab", "pakai",
    "tunggu", "panggil", "bawa", "cuci", "pilih", "pinjam", "bayar", "hitung", "ukur", "periksa",
    "pesan", "siap", "coba", "ganti", "hapus", "simpan", "kenal", "ubah", "atur", "jaga",
    "lapor", "rapat", "temu", "kumpul", "hasil", "ikut", "laku", "lanjut", "henti", "tolong",
    "pimpin", "ulang", "jelas", "cek", "cat", "bom", "tik", "las", "sewa", "ajak",
    "antar", "angkat", "aju", "bangun", "dapat", "dorong", "guna", "hadir", "hubung",
    "isi", "kembali", "kurang", "lepas", "letak", "minta", "nilai", "olah", "pasang", "potong",
    "putus", "salah", "sambung", "selesai", "setuju", "tambah", "tanda", "tarik", "tembak",
    "tentu", "tetap", "tulus", "undang", "usaha", "urus", "waspada",
    // nouns
    "rumah", "sekolah", "buku", "meja", "kursi", "pintu", "jendela", "mobil", "motor", "kantor",
    "pabrik", "mesin", "barang", "produk", "kualitas", "masalah", "bahaya", "aman", "selamat", "waktu",
    "hari", "minggu", "bulan", "tahun", "pagi", "siang", "sore", "malam", "orang", "anak",
    "teman", "keluarga", "air", "nasi", "roti", "kopi", "teh", "uang", "harga", "kota",
    "desa", "negara", "bahasa", "kata", "kalimat", "soal", "nama", "alat", "bagian", "lantai",
    "listrik", "bensin", "kabar", "kunci", "jam", "sistem", "data", "program", "tugas", "proses",
    // adjectives
    "baik", "besar", "kecil", "baru", "lama", "panjang", "pendek", "tinggi", "rendah", "cepat",
    "lambat", "mudah", "susah", "sulit", "mahal", "murah", "penting", "benar", "bersih", "kotor",
    "kuat", "lemah", "panas", "dingin", "ramai", "sepi", "sehat", "sakit", "cantik", "jelek",
    "licin", "lancar", "ringan", "berat", "dekat", "jauh", "penuh", "kosong",
];

/// Set of roots the analyzer trusts outright.
#[derive(Debug, Clone, Default)]
pub struct RootDictionary {
    roots: HashSet<String>,
}

impl RootDictionary {
    /// Built-in everyday vocabulary.
    pub fn indonesian() -> Self {
        Self::from_words(COMMON_ROOTS.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::default();
        dictionary.extend(words);
        dictionary
    }

    /// One root per line; blank lines and `#` comments are skipped.
    pub fn from_text(text: &str) -> Self {
        let mut dictionary = Self::default();
        dictionary.extend_from_text(text);
        dictionary
    }

    /// Add the roots of a one-per-line list.
    pub fn extend_from_text(&mut self, text: &str) {
        self.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() {
                self.roots.insert(word);
            }
        }
    }

    pub fn contains(&self, root: &str) -> bool {
        self.roots.contains(root)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
