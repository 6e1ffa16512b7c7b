pub const MENU_TOGGLE_MARKER: &str = "mobile-menu-btn";

pub const VENDOR_MARKER: &str = "genspark";

const ROOT_PATH_SLOT: &str = "{root_path}";

const HEADER_TEMPLATE: &str = r##"
    <header class="bg-white shadow-sm border-b">
        <nav class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
            <div class="flex justify-between items-center h-16">
                <!-- Logo/Branding -->
                <div class="flex items-center">
                    <div class="flex-shrink-0 flex items-center">
                        <a href="{root_path}/index.html" class="flex items-center">
                            <i class="fas fa-atom text-blue-600 text-2xl mr-3"></i>
                            <span class="text-xl font-bold text-gray-900">CellNucleus.com</span>
                        </a>
                    </div>
                </div>

                <!-- Navigation Menu -->
                <div class="hidden md:block">
                    <div class="ml-10 flex items-baseline space-x-8">
                        <a href="{root_path}/index.html" class="text-blue-600 hover:text-blue-800 px-3 py-2 rounded-md text-sm font-medium">Home</a>
                        <a href="{root_path}/reviews_index.html" class="text-gray-700 hover:text-blue-600 px-3 py-2 rounded-md text-sm font-medium">All Reviews</a>
                        <a href="{root_path}/index.html#reviews" class="text-gray-700 hover:text-blue-600 px-3 py-2 rounded-md text-sm font-medium">Categories</a>
                        <a href="{root_path}/index.html#microscopy" class="text-gray-700 hover:text-blue-600 px-3 py-2 rounded-md text-sm font-medium">Microscopy</a>
                        <a href="{root_path}/index.html#structure" class="text-gray-700 hover:text-blue-600 px-3 py-2 rounded-md text-sm font-medium">Structure</a>
                        <a href="{root_path}/downloads.html" class="text-gray-700 hover:text-blue-600 px-3 py-2 rounded-md text-sm font-medium">Downloads</a>
                        <a href="{root_path}/index.html#about" class="text-gray-700 hover:text-blue-600 px-3 py-2 rounded-md text-sm font-medium">About</a>
                    </div>
                </div>

                <!-- Mobile Menu Button -->
                 <div class="-mr-2 flex md:hidden">
                    <button type="button" id="mobile-menu-btn" class="bg-white inline-flex items-center justify-center p-2 rounded-md text-gray-400 hover:text-gray-500 hover:bg-gray-100 focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-blue-500" aria-controls="mobile-menu" aria-expanded="false">
                        <span class="sr-only">Open main menu</span>
                        <i class="fas fa-bars"></i>
                    </button>
                </div>
            </div>
            <!-- Mobile Menu (Hidden by default) -->
            <div class="hidden md:hidden" id="mobile-menu">
                <div class="px-2 pt-2 pb-3 space-y-1 sm:px-3">
                    <a href="{root_path}/index.html" class="text-gray-700 hover:text-blue-600 block px-3 py-2 rounded-md text-base font-medium">Home</a>
                    <a href="{root_path}/reviews_index.html" class="text-gray-700 hover:text-blue-600 block px-3 py-2 rounded-md text-base font-medium">All Reviews</a>
                    <a href="{root_path}/index.html#reviews" class="text-gray-700 hover:text-blue-600 block px-3 py-2 rounded-md text-base font-medium">Categories</a>
                    <a href="{root_path}/index.html#microscopy" class="text-gray-700 hover:text-blue-600 block px-3 py-2 rounded-md text-base font-medium">Microscopy</a>
                    <a href="{root_path}/index.html#structure" class="text-gray-700 hover:text-blue-600 block px-3 py-2 rounded-md text-base font-medium">Structure</a>
                    <a href="{root_path}/downloads.html" class="text-gray-700 hover:text-blue-600 block px-3 py-2 rounded-md text-base font-medium">Downloads</a>
                    <a href="{root_path}/index.html#about" class="text-gray-700 hover:text-blue-600 block px-3 py-2 rounded-md text-base font-medium">About</a>
                </div>
            </div>
        </nav>
    </header>
"##;

const FOOTER_TEMPLATE: &str = r##"
    <footer class="bg-gray-900 text-white py-12">
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
            <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                <div>
                    <div class="flex items-center mb-4">
                        <i class="fas fa-atom text-blue-400 text-2xl mr-3"></i>
                        <span class="text-xl font-bold">CellNucleus.com</span>
                    </div>
                    <p class="text-gray-300">Comprehensive nuclear biology research platform providing access to cutting-edge reviews and educational resources.</p>
                </div>
                <div>
                    <h4 class="text-lg font-semibold mb-4">Quick Links</h4>
                    <ul class="space-y-2 text-gray-300">
                        <li><a href="{root_path}/index.html#reviews" class="hover:text-white">Research Reviews</a></li>
                        <li><a href="{root_path}/index.html#microscopy" class="hover:text-white">Microscopy</a></li>
                        <li><a href="{root_path}/downloads.html" class="hover:text-white">Downloads</a></li>
                        <li><a href="{root_path}/index.html#about" class="hover:text-white">About</a></li>
                    </ul>
                </div>
                <div>
                    <h4 class="text-lg font-semibold mb-4">Contact & Share</h4>
                    <div class="space-y-2 text-gray-300">
                        <div><i class="fas fa-envelope mr-2"></i> mhendzel@ualberta.ca</div>
                        <div><i class="fas fa-globe mr-2"></i> www.cellnucleus.com</div>
                    </div>
                </div>
            </div>
            <div class="border-t border-gray-700 mt-8 pt-8 text-center text-gray-400">
                <p>&copy; 2025 CellNucleus.com - Nuclear Biology Research Hub.</p>
            </div>
        </div>
    </footer>
"##;

const SCRIPT_TEMPLATE: &str = r##"
    <script>
        document.addEventListener('DOMContentLoaded', function() {
            const mobileMenuBtn = document.getElementById('mobile-menu-btn');
            const mobileMenu = document.getElementById('mobile-menu');

            if (mobileMenuBtn && mobileMenu) {
                mobileMenuBtn.addEventListener('click', function() {
                    mobileMenu.classList.toggle('hidden');
                    const expanded = mobileMenuBtn.getAttribute('aria-expanded') === 'true' || false;
                    mobileMenuBtn.setAttribute('aria-expanded', !expanded);
                });
            }
        });
    </script>
"##;

pub fn header(root_path: &str) -> String {
    HEADER_TEMPLATE.replace(ROOT_PATH_SLOT, root_path)
}

pub fn footer(root_path: &str) -> String {
    FOOTER_TEMPLATE.replace(ROOT_PATH_SLOT, root_path)
}

pub fn interaction_script() -> &'static str {
    SCRIPT_TEMPLATE
}

/// Relative prefix from a page `depth` directories below the site root back to it.
pub fn root_path_for_depth(depth: usize) -> String {
    if depth == 0 {
        ".".to_string()
    } else {
        vec![".."; depth].join("/")
    }
}
